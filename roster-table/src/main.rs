use std::sync::Arc;

use roster_client::{MemoryRecordStore, RecordStore};
use roster_table::{RosterTable, ShellConfig, TracingNotifier, logger, view};
use shared::{EmployeeRecord, EmployeeStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境 (.env) 与日志
    let _ = dotenv::dotenv();
    let config = ShellConfig::from_env();
    logger::init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    // 2. 记录存储
    let store: Arc<dyn RecordStore> = if config.offline {
        tracing::info!("Using in-memory demo record store");
        Arc::new(MemoryRecordStore::new(demo_records()))
    } else {
        tracing::info!(base_url = %config.client.base_url, "Using HTTP record store");
        Arc::new(config.client.build_record_store()?)
    };

    // 3. 加载并渲染
    let table = RosterTable::load(store, Arc::new(TracingNotifier)).await;
    print!("{}", view::render_text(&view::rows(&table.snapshot())));

    Ok(())
}

fn demo_records() -> Vec<EmployeeRecord> {
    [
        ("1001", "Ada", "Lovelace", "ada@example.com", Some("5550100001"), true),
        ("1002", "Alan", "Turing", "alan@example.com", Some("5550100002"), true),
        ("1003", "Grace", "Hopper", "grace@example.com", None, false),
    ]
    .into_iter()
    .map(|(id, first, last, email, phone, active)| EmployeeRecord {
        employee_id: id.into(),
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        phone: phone.map(Into::into),
        status: EmployeeStatus::from(active),
    })
    .collect()
}
