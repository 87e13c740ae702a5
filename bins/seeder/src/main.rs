//! Database seeder for Renum development and testing.
//!
//! Seeds a fiscal year with an opening period, twelve monthly periods, and
//! a handful of draft/posted account moves for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, NaiveDate};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use renum_db::entities::{
    account_moves, fiscal_periods, fiscal_years, sea_orm_active_enums::MoveState,
};

/// Test fiscal year ID (consistent for all seeds)
const TEST_YEAR_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = renum_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding fiscal year...");
    if !seed_fiscal_year(&db).await {
        println!("  Fiscal year already exists, skipping...");
        println!("Seeding complete!");
        return;
    }

    println!("Seeding periods...");
    let period_ids = seed_periods(&db).await;

    println!("Seeding account moves...");
    seed_moves(&db, &period_ids).await;

    println!("Seeding complete!");
}

fn test_year_id() -> Uuid {
    Uuid::parse_str(TEST_YEAR_ID).expect("Invalid test year id")
}

fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

/// Seeds the test fiscal year; returns false if it already exists.
async fn seed_fiscal_year(db: &DatabaseConnection) -> bool {
    if fiscal_years::Entity::find_by_id(test_year_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        return false;
    }

    let year = fiscal_years::ActiveModel {
        id: Set(test_year_id()),
        name: Set("FY2026".to_string()),
        start_date: Set(NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")),
        end_date: Set(NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date")),
        created_at: Set(now()),
        updated_at: Set(now()),
    };
    year.insert(db).await.expect("Failed to insert fiscal year");
    true
}

/// Seeds the opening period plus twelve monthly periods; returns their ids
/// with the opening period first.
async fn seed_periods(db: &DatabaseConnection) -> Vec<Uuid> {
    let mut ids = Vec::with_capacity(13);

    let opening = fiscal_periods::ActiveModel {
        id: Set(Uuid::new_v4()),
        fiscal_year_id: Set(test_year_id()),
        name: Set("Opening 2026".to_string()),
        period_number: Set(0),
        start_date: Set(NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")),
        end_date: Set(NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")),
        is_opening: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
    };
    ids.push(opening.insert(db).await.expect("Failed to insert period").id);

    for month in 1u32..=12 {
        let start = NaiveDate::from_ymd_opt(2026, month, 1).expect("valid date");
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date")
        } else {
            NaiveDate::from_ymd_opt(2026, month + 1, 1)
                .expect("valid date")
                .pred_opt()
                .expect("valid date")
        };

        let period = fiscal_periods::ActiveModel {
            id: Set(Uuid::new_v4()),
            fiscal_year_id: Set(test_year_id()),
            name: Set(format!("{} 2026", month_name(month))),
            period_number: Set(i16::try_from(month).expect("valid month")),
            start_date: Set(start),
            end_date: Set(end),
            is_opening: Set(false),
            created_at: Set(now()),
            updated_at: Set(now()),
        };
        ids.push(period.insert(db).await.expect("Failed to insert period").id);
    }

    ids
}

/// Seeds a mix of posted and draft moves across the first periods.
async fn seed_moves(db: &DatabaseConnection, period_ids: &[Uuid]) {
    // Two posted carry-forward entries in the opening period.
    for day in [1, 1] {
        insert_move(db, period_ids[0], date(1, day), MoveState::Posted).await;
    }

    // Posted moves in January and February, one draft left alone.
    insert_move(db, period_ids[1], date(1, 5), MoveState::Posted).await;
    insert_move(db, period_ids[1], date(1, 20), MoveState::Posted).await;
    insert_move(db, period_ids[1], date(1, 28), MoveState::Draft).await;
    insert_move(db, period_ids[2], date(2, 3), MoveState::Posted).await;
}

async fn insert_move(db: &DatabaseConnection, period_id: Uuid, d: NaiveDate, state: MoveState) {
    let mv = account_moves::ActiveModel {
        id: Set(Uuid::new_v4()),
        period_id: Set(period_id),
        reference: Set("/".to_string()),
        date: Set(d),
        state: Set(state),
        description: Set(Some(format!("Seed move for {}-{:02}", d.year(), d.month()))),
        created_at: Set(now()),
        updated_at: Set(now()),
    };
    mv.insert(db).await.expect("Failed to insert move");
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid date")
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
