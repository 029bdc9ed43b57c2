//! Basic pipeline usage example
//!
//! Demonstrates console and rotating file output, formatting, conditional
//! logging, scope timing and concurrent producers.
//!
//! Run with: cargo run --example basic_usage

use logpipe::prelude::*;
use logpipe::{debug, error, fatal, info, log_if, log_scope, warn};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn basic_logging(logger: &Logger) {
    log_scope!(logger, "basic logging", Severity::Info);

    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    fatal!(logger, "This is a fatal message");
}

fn formatting(logger: &Logger) {
    log_scope!(logger, "formatting", Severity::Info);

    let player_id = 12345;
    let (x, y) = (100.5_f32, 200.7_f32);
    let name = "PlayerOne";

    info!(logger, "Player info: id={}, name={}", player_id, name);
    info!(logger, "Player {} position: ({}, {})", player_id, x, y);
    warn!(logger, "{}% health remaining", 25);
    debug!(logger, "int: {}, float: {}, str: {}, bool: {}", 42, 2.5, "text", true);

    // Templates only known at runtime go through `log_template`
    let template = String::from("Loaded {} of {} chunks");
    logger.log_template(Severity::Info, &template, &[&48, &64]);
}

fn conditional_logging(logger: &Logger) {
    log_scope!(logger, "conditional logging", Severity::Info);

    let health = 20;
    let max_health = 100;
    let is_critical = health * 10 < max_health * 3;

    log_if!(logger, is_critical, Severity::Error, "Player health critical! ({}/{})", health, max_health);
    log_if!(logger, !is_critical, Severity::Info, "Player health fine ({}/{})", health, max_health);

    for i in 0..5 {
        log_if!(logger, i % 2 == 0, Severity::Debug, "Even iteration: {}", i);
    }
}

fn severity_filtering(logger: &Logger) {
    log_scope!(logger, "severity filtering", Severity::Info);

    info!(logger, "=== Everything from DEBUG up ===");
    logger.set_minimum_severity(Severity::Debug);
    debug!(logger, "DEBUG message");
    info!(logger, "INFO message");

    info!(logger, "=== Only WARN and above ===");
    logger.set_minimum_severity(Severity::Warn);
    debug!(logger, "This DEBUG message is hidden");
    info!(logger, "This INFO message is hidden too");
    warn!(logger, "This WARN message is visible");

    logger.set_minimum_severity(Severity::Debug);
    info!(logger, "Minimum severity restored to DEBUG");
}

fn nested_scopes(logger: &Logger) {
    log_scope!(logger, "database connection");
    thread::sleep(Duration::from_millis(50));

    {
        log_scope!(logger, "query");
        thread::sleep(Duration::from_millis(30));
        info!(logger, "SELECT * FROM users finished");
    }

    {
        log_scope!(logger, "result processing", Severity::Info);
        thread::sleep(Duration::from_millis(20));
        info!(logger, "Processed {} records", 100);
    }
}

fn multithreading(logger: &Arc<Logger>) {
    log_scope!(logger, "multithreading", Severity::Info);

    let thread_count = 5;
    let messages_per_thread = 10;
    info!(logger, "Starting {} threads with {} messages each", thread_count, messages_per_thread);

    let handles: Vec<_> = (0..thread_count)
        .map(|id| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                for i in 0..messages_per_thread {
                    info!(logger, "Thread {} - message {}/{}", id, i + 1, messages_per_thread);
                    if i % 5 == 0 {
                        warn!(logger, "Thread {} - checkpoint {}", id, i / 5);
                    }
                    thread::sleep(Duration::from_millis(10 + id * 5));
                }
                error!(logger, "Thread {} - last message", id);
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
    info!(logger, "All threads finished");
}

fn throughput(logger: &Logger) {
    log_scope!(logger, "throughput", Severity::Info);

    let count = 1_000;
    let start = Instant::now();
    for i in 0..count {
        debug!(logger, "Message {} - data: {}, {}, {}", i, i * 2, f64::from(i) * 1.5, "payload");
    }
    let elapsed = start.elapsed();

    info!(logger, "Queued {} messages in {:?}", count, elapsed);
    info!(
        logger,
        "Producer throughput: {:.0} messages/sec",
        f64::from(count) / elapsed.as_secs_f64().max(f64::EPSILON)
    );
}

fn main() -> Result<()> {
    println!("=== logpipe - Basic Usage Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .min_severity(Severity::Debug)
            .sink(ConsoleSink::new())
            // 1 MiB per file, three rotated generations
            .sink(FileSink::with_limits("logs/demo.log", 1024 * 1024, 3))
            .build()?,
    );

    info!(logger, "Logger ready - console and file output enabled");
    info!(logger, "Log file: logs/demo.log");

    basic_logging(&logger);
    formatting(&logger);
    conditional_logging(&logger);
    severity_filtering(&logger);
    nested_scopes(&logger);
    multithreading(&logger);
    throughput(&logger);

    // Deliver everything still queued before exiting
    logger.shutdown()?;

    let metrics = logger.metrics();
    println!("\n=== Pipeline metrics ===");
    println!("Enqueued:   {}", metrics.enqueued());
    println!("Dispatched: {}", metrics.dispatched());
    println!("Evicted:    {}", metrics.evicted());

    Ok(())
}
