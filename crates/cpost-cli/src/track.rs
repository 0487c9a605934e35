//! # Tracking Subcommands
//!
//! `history`, `status` and `delivered` handlers.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use cpost_client::{Delivery, HttpClient, ParcelHistoryRequestor, State};

/// Arguments shared by `history` and `status`.
#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Parcel tracking number (e.g. RR123456789CZ).
    pub tracking_number: String,

    /// Print states as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the delivered subcommand.
#[derive(Args, Debug)]
pub struct DeliveredArgs {
    /// Parcel tracking number (e.g. RR123456789CZ).
    pub tracking_number: String,
}

/// Print every state of a parcel, oldest first.
pub async fn run_history<H: HttpClient>(
    args: &TrackArgs,
    requestor: &ParcelHistoryRequestor<H>,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let states = requestor
        .history(&args.tracking_number)
        .await
        .with_context(|| format!("failed to fetch history of {}", args.tracking_number))?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&states)?)?;
    } else {
        for state in &states {
            writeln!(out, "{}", format_state(state))?;
        }
    }
    Ok(0)
}

/// Print the newest state of a parcel.
pub async fn run_status<H: HttpClient>(
    args: &TrackArgs,
    requestor: &ParcelHistoryRequestor<H>,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let state = requestor
        .status(&args.tracking_number)
        .await
        .with_context(|| format!("failed to fetch status of {}", args.tracking_number))?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
    } else {
        writeln!(out, "{}", format_state(&state))?;
    }
    Ok(0)
}

/// Print whether a parcel was delivered. Exit code 0 only when it was.
pub async fn run_delivered<H: HttpClient>(
    args: &DeliveredArgs,
    requestor: &ParcelHistoryRequestor<H>,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let delivery = requestor
        .delivery(&args.tracking_number)
        .await
        .with_context(|| format!("failed to check delivery of {}", args.tracking_number))?;

    if let Delivery::Unconfirmed { message } = &delivery {
        tracing::warn!(tracking_number = %args.tracking_number, "delivery unconfirmed: {message}");
    }

    writeln!(out, "{}", delivery.is_delivered())?;
    Ok(if delivery.is_delivered() { 0 } else { 1 })
}

/// One line per state: date, code, description, post office.
pub fn format_state(state: &State) -> String {
    let mut line = format!(
        "{:<10}  {:>3}  {}",
        state.raw_date().unwrap_or("-"),
        state.id(),
        state.text()
    );
    match (state.postcode(), state.name()) {
        (Some(postcode), Some(name)) => line.push_str(&format!(" ({postcode} {name})")),
        (Some(only), None) | (None, Some(only)) => line.push_str(&format!(" ({only})")),
        (None, None) => {}
    }
    line
}
