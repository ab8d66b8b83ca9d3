use anyhow::Result;
use settingcache::{demo, logging, SettingStore};
use std::io::{self, Write};
use tracing::debug;

fn main() -> Result<()> {
    logging::init_tracing(None)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reports = demo::run(SettingStore::global(), &mut out)?;
    out.flush()?;

    for report in &reports {
        debug!(?report, "scenario report");
    }
    Ok(())
}
