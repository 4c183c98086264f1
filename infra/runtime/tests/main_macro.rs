use std::sync::atomic::{AtomicBool, Ordering};

static RAN: AtomicBool = AtomicBool::new(false);

#[keel_runtime::main(memory_efficient)]
async fn entry() -> anyhow::Result<()> {
    tokio::task::yield_now().await;
    RAN.store(true, Ordering::SeqCst);
    Ok(())
}

#[test]
fn main_macro_runs_the_body_on_a_runtime() {
    entry().unwrap();
    assert!(RAN.load(Ordering::SeqCst));
}
