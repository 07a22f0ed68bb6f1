//! Traffic Light Demo
//!
//! Runs a light with a one-second interval, prints the lamps on every
//! change, declares an outage partway through and clears it again.
//!
//! Key concepts:
//! - Timer-driven auto-advance (Green 4s, Yellow 1s, Red 4s)
//! - Manual events interleaved with timer ticks
//! - Outage override restoring the interrupted state
//!
//! Run with: RUST_LOG=stoplight=debug cargo run --example traffic_light

use std::time::Duration;
use stoplight::core::{Aspect, Context};
use stoplight::{LightEvent, TrafficLight};
use tokio::time::{sleep, Instant};
use tracing_subscriber::EnvFilter;

fn lamp(aspect: Aspect) -> &'static str {
    match aspect {
        Aspect::Off => "  ",
        Aspect::On => "()",
        Aspect::Blinking => "**",
    }
}

fn render(context: &Context) {
    let lamps = context.lamps();
    println!(
        "  [G {}] [Y {}] [R {}]  change: {:<8} walk: {}",
        lamp(lamps.green),
        lamp(lamps.yellow),
        lamp(lamps.red),
        if context.change_enabled() { "enabled" } else { "disabled" },
        if context.walk_allowed() { "yes" } else { "no" },
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light ===\n");

    let mut light = TrafficLight::create(1)?;
    render(light.context());

    let started = Instant::now();
    let outage_at = sleep(Duration::from_secs(7));
    tokio::pin!(outage_at);
    let mut outage_declared = false;

    // Cycle on the timer, with an outage declared at 7s and cleared 3s later.
    while started.elapsed() < Duration::from_secs(20) {
        tokio::select! {
            Some(_) = light.tick() => render(light.context()),
            _ = &mut outage_at, if !outage_declared => {
                outage_declared = true;
                println!("\n-- outage declared --");
                light.send(LightEvent::toggle_outage(light.context()));
                render(light.context());

                sleep(Duration::from_secs(3)).await;
                println!("-- outage cleared --\n");
                light.send(LightEvent::toggle_outage(light.context()));
                render(light.context());
            }
            else => break,
        }
    }

    println!("\nTransitions recorded: {}", light.history().len());
    light.dispose();

    println!("\n=== Demo Complete ===");
    Ok(())
}
