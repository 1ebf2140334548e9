use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use consolebar::{BarError, BarOption, ProgressBar};

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub max: i64,
    pub delay: Duration,
    pub threads: usize,
    pub options: Vec<BarOption>,
}

/// Drive one bar from `0` to `max`, either in sequence or from worker threads.
pub fn run<W: Write + Send>(config: &DemoConfig, writer: W) -> Result<()> {
    let bar = ProgressBar::with_writer(config.max, config.options.iter().copied(), writer)?;

    if config.threads <= 1 {
        info!("Running {} sequential updates", config.max);
        bar.start()?;
        for i in 0..config.max {
            bar.set(i)?;
            pause(config.delay);
        }
    } else {
        info!("Running {} updates across {} workers", config.max, config.threads);
        run_workers(&bar, config)?;
    }

    bar.finish()?;
    Ok(())
}

fn run_workers<W: Write + Send>(bar: &ProgressBar<W>, config: &DemoConfig) -> Result<()> {
    let shares = split_work(config.max, config.threads);

    thread::scope(|s| -> Result<()> {
        let handles: Vec<_> = shares
            .into_iter()
            .enumerate()
            .map(|(worker, share)| {
                s.spawn(move || -> Result<(), BarError> {
                    debug!("Worker {worker} taking {share} steps");
                    for _ in 0..share {
                        bar.increment()?;
                        pause(config.delay);
                    }
                    Ok(())
                })
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .map_err(|_| anyhow!("progress worker panicked"))??;
        }
        Ok(())
    })
}

/// Split `total` steps over `workers`, the first workers taking the remainder.
fn split_work(total: i64, workers: usize) -> Vec<i64> {
    let workers = workers.max(1) as i64;
    let base = total / workers;
    let extra = total % workers;
    (0..workers)
        .map(|i| base + i64::from(i < extra))
        .collect()
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
