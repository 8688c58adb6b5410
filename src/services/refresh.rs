//! 定时刷新与过期结果丢弃
//!
//! 同一视图的手动刷新与定时刷新可能同时在途。每次刷新领取一个递增的代号，
//! 只有最新代号的结果才会写回缓存；返回给前端的结果也带上代号，前端据此丢弃旧结果。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct RefreshGeneration {
    counter: AtomicU64,
}

impl RefreshGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 领取新代号，之前领取的代号全部过期
    pub fn begin(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, token: u64) -> bool {
        self.counter.load(Ordering::SeqCst) == token
    }
}

/// 带刷新代号的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub generation: u64,
    pub data: T,
}

/// 单个视图的最新结果
pub struct LatestValue<T> {
    generation: RefreshGeneration,
    value: Mutex<Option<Versioned<T>>>,
}

impl<T: Clone> Default for LatestValue<T> {
    fn default() -> Self {
        Self {
            generation: RefreshGeneration::new(),
            value: Mutex::new(None),
        }
    }
}

impl<T: Clone> LatestValue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 执行一次刷新；结果总会返回，但只有仍是最新代号时才写回缓存
    pub async fn refresh<F>(&self, fetch: F) -> Versioned<T>
    where
        F: Future<Output = T>,
    {
        let token = self.generation.begin();
        let data = fetch.await;
        let result = Versioned { generation: token, data };
        if self.generation.is_latest(token) {
            if let Ok(mut slot) = self.value.lock() {
                *slot = Some(result.clone());
            }
        } else {
            log::debug!("丢弃过期刷新结果 generation={}", token);
        }
        result
    }

    pub fn is_latest(&self, generation: u64) -> bool {
        self.generation.is_latest(generation)
    }

    pub fn get(&self) -> Option<Versioned<T>> {
        self.value.lock().ok().and_then(|slot| slot.clone())
    }
}

/// 按视图名管理的定时任务；同名任务重新启动时旧任务被取消
#[derive(Default)]
pub struct RefreshRegistry {
    tasks: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl RefreshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每隔 `every` 执行一次 `tick`；首次执行在一个周期之后（挂载时视图自己会先拉一次）
    pub fn start<F, Fut>(&self, view: &str, every: Duration, tick: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            interval.tick().await;
            loop {
                interval.tick().await;
                tick().await;
            }
        });

        if let Ok(mut tasks) = self.tasks.lock() {
            if let Some(previous) = tasks.insert(view.to_string(), handle) {
                previous.abort();
            }
        }
        log::info!("启动自动刷新: {} 每 {}s", view, every.as_secs());
    }

    pub fn stop(&self, view: &str) -> bool {
        let removed = self.tasks.lock().ok().and_then(|mut tasks| tasks.remove(view));
        match removed {
            Some(handle) => {
                handle.abort();
                log::info!("停止自动刷新: {}", view);
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, view: &str) -> bool {
        self.tasks
            .lock()
            .map(|tasks| tasks.get(view).map_or(false, |h| !h.is_finished()))
            .unwrap_or(false)
    }

    pub fn stop_all(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for (_, handle) in tasks.drain() {
                handle.abort();
            }
        }
    }
}

impl Drop for RefreshRegistry {
    fn drop(&mut self) {
        self.stop_all();
    }
}
