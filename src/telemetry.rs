//! 日誌初始化

use tracing_subscriber::EnvFilter;

/// 安裝 fmt 日誌輸出，層級由 `RUST_LOG` 控制（預設 `info`）
///
/// 可重複呼叫，之後的呼叫不生效。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
