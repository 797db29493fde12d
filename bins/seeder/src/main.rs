//! Database seeder for PropShare development and testing.
//!
//! Seeds an admin, two investors, a fractional demo property with stakes,
//! and one undistributed revenue period ready for a distribution run.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use propshare_shared::AppConfig;

use propshare_db::entities::{
    investments, properties, revenue_periods,
    sea_orm_active_enums::{PropertyStatus, UserRole},
    users,
};

/// Admin user ID (consistent for all seeds)
const ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";
/// First investor ID (consistent for all seeds)
const INVESTOR_A_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Second investor ID (consistent for all seeds)
const INVESTOR_B_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Demo property ID (consistent for all seeds)
const PROPERTY_ID: &str = "00000000-0000-0000-0000-000000000010";
/// First stake ID (consistent for all seeds)
const INVESTMENT_A_ID: &str = "00000000-0000-0000-0000-000000000011";
/// Second stake ID (consistent for all seeds)
const INVESTMENT_B_ID: &str = "00000000-0000-0000-0000-000000000012";
/// Demo revenue period ID (consistent for all seeds)
const REVENUE_PERIOD_ID: &str = "00000000-0000-0000-0000-000000000020";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // RUST_LOG controls query logging from sea-orm
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Connecting to database...");
    let db = match std::env::var("DATABASE_URL") {
        Ok(url) => propshare_db::connect(&url).await,
        Err(_) => {
            let config = AppConfig::load().expect("Failed to load configuration");
            propshare_db::connect_with(&config.database).await
        }
    }
    .expect("Failed to connect to database");

    println!("Seeding users...");
    seed_users(&db).await;

    println!("Seeding demo property...");
    seed_property(&db).await;

    println!("Seeding investments...");
    seed_investments(&db).await;

    println!("Seeding revenue period...");
    seed_revenue_period(&db).await;

    println!("Seeding complete!");
}

fn fixed_id(id: &str) -> Uuid {
    Uuid::parse_str(id).expect("seed IDs are valid UUIDs")
}

/// Seeds the admin and two investor accounts.
async fn seed_users(db: &DatabaseConnection) {
    let seeds = [
        (ADMIN_ID, "admin@propshare.dev", "Demo Admin", UserRole::Admin),
        (
            INVESTOR_A_ID,
            "amina@propshare.dev",
            "Amina Diallo",
            UserRole::Investor,
        ),
        (
            INVESTOR_B_ID,
            "kwame@propshare.dev",
            "Kwame Mensah",
            UserRole::Investor,
        ),
    ];

    for (id, email, name, role) in seeds {
        let id = fixed_id(id);
        if users::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  User {email} already exists, skipping...");
            continue;
        }

        let user = users::ActiveModel {
            id: Set(id),
            email: Set(email.to_string()),
            full_name: Set(name.to_string()),
            phone: Set(None),
            role: Set(role),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = user.insert(db).await {
            eprintln!("Failed to insert user {email}: {e}");
        } else {
            println!("  Created user: {email}");
        }
    }
}

/// Seeds the fractional demo property: 1000 fractions, 500 sold.
async fn seed_property(db: &DatabaseConnection) {
    let id = fixed_id(PROPERTY_ID);
    if properties::Entity::find_by_id(id)
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo property already exists, skipping...");
        return;
    }

    let property = properties::ActiveModel {
        id: Set(id),
        title: Set("Seaside Villa".to_string()),
        location: Set("Lagos, Nigeria".to_string()),
        description: Set(Some(
            "Fractionally owned short-let villa used for demos".to_string(),
        )),
        status: Set(PropertyStatus::Invested),
        total_fractions: Set(Some(1000)),
        fraction_price: Set(Some(dec!(50_000))),
        project_value: Set(Some(dec!(50_000_000))),
        fractions_sold: Set(500),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = property.insert(db).await {
        eprintln!("Failed to insert demo property: {e}");
    } else {
        println!("  Created property: Seaside Villa");
    }
}

/// Seeds two stakes: 300 fractions for Amina, 200 for Kwame.
async fn seed_investments(db: &DatabaseConnection) {
    let seeds = [
        (INVESTMENT_A_ID, INVESTOR_A_ID, 300, dec!(15_000_000)),
        (INVESTMENT_B_ID, INVESTOR_B_ID, 200, dec!(10_000_000)),
    ];

    for (id, user_id, fractions, value) in seeds {
        let id = fixed_id(id);
        if investments::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Investment for {user_id} already exists, skipping...");
            continue;
        }

        let investment = investments::ActiveModel {
            id: Set(id),
            user_id: Set(fixed_id(user_id)),
            property_id: Set(fixed_id(PROPERTY_ID)),
            fractions_owned: Set(Some(fractions)),
            initial_value: Set(value),
            current_value: Set(value),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = investment.insert(db).await {
            eprintln!("Failed to insert investment for {user_id}: {e}");
        } else {
            println!("  Created investment: {fractions} fractions for {user_id}");
        }
    }
}

/// Seeds one undistributed revenue period with net income 2,150,000.
async fn seed_revenue_period(db: &DatabaseConnection) {
    let id = fixed_id(REVENUE_PERIOD_ID);
    if revenue_periods::Entity::find_by_id(id)
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Demo revenue period already exists, skipping...");
        return;
    }

    let period = revenue_periods::ActiveModel {
        id: Set(id),
        property_id: Set(fixed_id(PROPERTY_ID)),
        month: Set(1),
        year: Set(2026),
        gross_revenue: Set(dec!(2_500_000)),
        expenses: Set(dec!(350_000)),
        distributed: Set(false),
        distribution_date: Set(None),
        created_by: Set(fixed_id(ADMIN_ID)),
        notes: Set(Some("Seeded demo period".to_string())),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = period.insert(db).await {
        eprintln!("Failed to insert demo revenue period: {e}");
    } else {
        println!("  Created revenue period: Jan 2026");
    }
}
