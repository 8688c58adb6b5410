use serde_json::Value;

/// 读取数值字段：接受 JSON 数字或数字字符串（允许尾随 `%`、千分位逗号），其他一律视为缺失
pub fn opt_f64(item: &Value, key: &str) -> Option<f64> {
    match item.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.trim().trim_end_matches('%').chars().filter(|c| *c != ',').collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    }
}

pub fn f64_or_zero(item: &Value, key: &str) -> f64 {
    opt_f64(item, key).unwrap_or(0.0)
}

/// 读取文本字段：股票代码经常被模型输出成数字，这里一并接受
pub fn opt_string(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn string_or_empty(item: &Value, key: &str) -> String {
    opt_string(item, key).unwrap_or_default()
}

pub fn u32_or_zero(item: &Value, key: &str) -> u32 {
    opt_f64(item, key)
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v.round() as u32)
        .unwrap_or(0)
}

pub fn bool_or_false(item: &Value, key: &str) -> bool {
    match item.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// 字符串数组：丢弃非文本元素
pub fn string_list(item: &Value, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// 对象数组：丢弃非对象元素后逐条转换
pub fn record_list<T>(item: &Value, key: &str, convert: impl Fn(&Value) -> T) -> Vec<T> {
    item.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter(|v| v.is_object()).map(convert).collect())
        .unwrap_or_default()
}

/// 按字符截断（日志里打印模型原文用，避免切在多字节字符中间）
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_accept_numeric_strings() {
        let v = json!({"a": 1.5, "b": "2.25", "c": " -3.1% ", "d": "1,234.5", "e": "n/a", "f": null});
        assert_eq!(opt_f64(&v, "a"), Some(1.5));
        assert_eq!(opt_f64(&v, "b"), Some(2.25));
        assert_eq!(opt_f64(&v, "c"), Some(-3.1));
        assert_eq!(opt_f64(&v, "d"), Some(1234.5));
        assert_eq!(opt_f64(&v, "e"), None);
        assert_eq!(opt_f64(&v, "f"), None);
        assert_eq!(f64_or_zero(&v, "missing"), 0.0);
    }

    #[test]
    fn test_codes_as_numbers_become_strings() {
        let v = json!({"code": 600519, "name": " 贵州茅台 ", "bad": [1]});
        assert_eq!(string_or_empty(&v, "code"), "600519");
        assert_eq!(string_or_empty(&v, "name"), "贵州茅台");
        assert_eq!(string_or_empty(&v, "bad"), "");
    }

    #[test]
    fn test_u32_rounds_and_clamps_negative() {
        let v = json!({"a": 2.6, "b": -1, "c": "3"});
        assert_eq!(u32_or_zero(&v, "a"), 3);
        assert_eq!(u32_or_zero(&v, "b"), 0);
        assert_eq!(u32_or_zero(&v, "c"), 3);
    }

    #[test]
    fn test_string_list_drops_non_text() {
        let v = json!({"tags": ["AI", 1, null, {"x": 1}, "", "低空经济"]});
        assert_eq!(string_list(&v, "tags"), vec!["AI", "1", "低空经济"]);
        assert!(string_list(&v, "missing").is_empty());
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("上证指数abc", 4), "上证指数");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
