use chrono::NaiveDate;
use tripplan::config::AppConfig;
use tripplan::error::AppError;
use tripplan::models::trip::{Accommodation, Budget, Destination, TripRecord, TripStatus};
use tripplan::state::AppState;
use tripplan::submit::submit_trip;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(config).await?;

    // 三亚旅行计划
    let trip = TripRecord {
        destination: Destination {
            city: "三亚".into(),
            country: "中国".into(),
            region: "海南".into(),
        },
        departure_date: date(2026, 2, 4)?,
        return_date: date(2026, 2, 5)?,
        duration_days: 2,
        budget: Budget {
            total: 3000.0,
            currency: "CNY".into(),
        },
        purpose: "vacation".into(),
        travelers: 2,
        climate: "热带海洋性气候，温暖湿润".into(),
        activities: vec![
            "海滩".into(),
            "水上活动".into(),
            "海鲜美食".into(),
            "观光".into(),
        ],
        accommodation: Accommodation {
            kind: "度假酒店".into(),
            location: "亚龙湾".into(),
        },
        notes: "上海到三亚的2天周末游".into(),
    };

    let mut stdout = std::io::stdout().lock();
    submit_trip(state.store.as_ref(), &trip, &TripStatus::current(), &mut stdout).await?;

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::Other(anyhow::anyhow!("invalid date {year}-{month}-{day}")))
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tripplan=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
