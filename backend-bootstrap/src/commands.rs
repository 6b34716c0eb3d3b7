use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use tracing::{debug, info};
use uuid::Uuid;

use backend_application::commands::{scan_commands, token_commands};
use backend_application::queries::attendance_queries;
use backend_domain::ports::LocationProvider;
use backend_domain::{parse_instant, EventId, EventRecord, Geofence};
use backend_infrastructure::FixedLocationProvider;

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct CreateEventArgs {
    /// Event title
    #[arg(long)]
    pub title: String,
    /// Event id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,
    /// Event start time, RFC 3339
    #[arg(long)]
    pub start: Option<String>,
    /// Geofence center latitude
    #[arg(long)]
    pub latitude: Option<f64>,
    /// Geofence center longitude
    #[arg(long)]
    pub longitude: Option<f64>,
    /// Geofence radius in meters
    #[arg(long)]
    pub radius: Option<f64>,
    /// Geofence display address
    #[arg(long)]
    pub address: Option<String>,
    /// Manual QR expiration, RFC 3339
    #[arg(long)]
    pub manual_expiration: Option<String>,
    /// Attendance deadline, RFC 3339
    #[arg(long)]
    pub deadline: Option<String>,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Raw decoded QR payload (the JSON string from the camera layer)
    pub payload: String,
    /// Device latitude
    #[arg(long)]
    pub latitude: Option<f64>,
    /// Device longitude
    #[arg(long)]
    pub longitude: Option<f64>,
    /// Reported GPS accuracy in meters
    #[arg(long, default_value_t = 15.0)]
    pub accuracy: f64,
    /// Simulate the user denying the location permission
    #[arg(long)]
    pub deny_location: bool,
}

pub async fn create_event(args: CreateEventArgs) -> Result<()> {
    let geofence = match (args.latitude, args.longitude, args.radius) {
        (Some(latitude), Some(longitude), Some(radius)) => Some(Geofence {
            latitude,
            longitude,
            radius,
            address: args.address,
        }),
        (None, None, None) => None,
        _ => bail!("a geofence requires --latitude, --longitude and --radius together"),
    };

    let event = EventRecord {
        id: EventId(args.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
        title: args.title,
        start_time: parse_cli_instant("--start", args.start)?,
        geofence,
        qr_manual_expiration: parse_cli_instant("--manual-expiration", args.manual_expiration)?,
        attendance_deadline: parse_cli_instant("--deadline", args.deadline)?,
        attendees: Vec::new(),
        version: 0,
    };

    let context = AppContext::new(Arc::new(FixedLocationProvider::unavailable())).await?;
    context.store.insert_event(&event).await?;
    info!(event_id = %event.id.as_str(), "event created");
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

pub async fn issue_token(event_id: &str) -> Result<()> {
    let context = AppContext::new(Arc::new(FixedLocationProvider::unavailable())).await?;
    let issued = token_commands::issue_event_token(&context.state, event_id).await?;
    println!("{}", serde_json::to_string_pretty(&issued)?);
    Ok(())
}

pub async fn scan(args: ScanArgs) -> Result<()> {
    let location: Arc<dyn LocationProvider> = if args.deny_location {
        Arc::new(FixedLocationProvider::denied())
    } else {
        match (args.latitude, args.longitude) {
            (Some(latitude), Some(longitude)) => Arc::new(FixedLocationProvider::with_position(
                latitude,
                longitude,
                args.accuracy,
            )),
            (None, None) => Arc::new(FixedLocationProvider::unavailable()),
            _ => bail!("a device position requires both --latitude and --longitude"),
        }
    };

    let context = AppContext::new(location).await?;
    let verdict = scan_commands::process_scan(&context.state, &args.payload).await;

    let snapshot = context.state.metrics.snapshot();
    debug!(
        scans = snapshot.scans,
        approvals = snapshot.approvals,
        rejections = snapshot.rejections,
        "session metrics"
    );
    println!("{}", serde_json::to_string_pretty(&verdict)?);

    if !verdict.is_approved() {
        std::process::exit(1);
    }
    Ok(())
}

pub async fn attendees(event_id: &str) -> Result<()> {
    let context = AppContext::new(Arc::new(FixedLocationProvider::unavailable())).await?;
    let summary = attendance_queries::event_attendance(&context.state, event_id).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn parse_cli_instant(label: &str, value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            parse_instant(&raw)
                .ok_or_else(|| anyhow!("{label} is not a valid RFC 3339 timestamp: '{raw}'"))
        })
        .transpose()
}
