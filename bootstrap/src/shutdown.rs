//! Graceful Shutdown

use std::future::Future;

use tokio::sync::watch;
use tracing::info;

/// Shutdown 控制器
///
/// 触发后，之前和之后注册的等待者都会被唤醒。
#[derive(Clone)]
pub struct ShutdownController {
    tx: watch::Sender<bool>,
    rx: watch::Receiver<bool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx, rx }
    }

    /// 触发关闭
    pub fn shutdown(&self) {
        info!("Triggering shutdown");
        self.tx.send_replace(true);
    }

    /// 等待关闭信号
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.rx.clone();
        async move {
            // 发送端随 self 存活，Err 只会在所有控制器被丢弃后出现
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
