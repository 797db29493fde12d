//! Integration tests for the distribution repository.
//!
//! These tests run against a live Postgres database with migrations
//! applied. They are skipped when `DATABASE_URL` is not set.

use std::env;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use propshare_db::entities::investments;

use propshare_core::distribution::{
    DistributionError as DomainError, DistributionStatus as CoreStatus, StatusUpdate,
};
use propshare_db::entities::sea_orm_active_enums::{DistributionStatus, UserRole};
use propshare_db::repositories::{
    AssignInvestmentInput, CreateOccupancyInput, CreatePropertyInput, CreateRevenueInput,
    CreateUserInput, DistributionError, DistributionFilter, DistributionRepository,
    InvestmentRepository, OccupancyRepository, PropertyRepository, RevenueRepository,
    UserRepository,
};

async fn test_db() -> Option<DatabaseConnection> {
    let url = env::var("DATABASE_URL").ok()?;
    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

struct Fixture {
    admin_id: Uuid,
    property_id: Uuid,
    investment_a: Uuid,
    investment_b: Uuid,
    revenue_period_id: Uuid,
}

/// Seeds a fractional property (1000 fractions) with two investors holding
/// 300 and 200 fractions, one flat stake, and one undistributed revenue
/// period with net income 2,150,000.
async fn seed(db: &DatabaseConnection, month: i32, year: i32) -> Fixture {
    let users = UserRepository::new(db.clone());
    let properties = PropertyRepository::new(db.clone());
    let investments = InvestmentRepository::new(db.clone());
    let revenue = RevenueRepository::new(db.clone());

    let admin = users
        .create(CreateUserInput {
            email: format!("dist-admin-{}@example.com", Uuid::new_v4()),
            full_name: "Distribution Admin".to_string(),
            phone: None,
            role: UserRole::Admin,
        })
        .await
        .expect("create admin");

    let mut investor_ids = Vec::new();
    for i in 0..3 {
        let investor = users
            .create(CreateUserInput {
                email: format!("dist-investor-{i}-{}@example.com", Uuid::new_v4()),
                full_name: format!("Investor {i}"),
                phone: None,
                role: UserRole::Investor,
            })
            .await
            .expect("create investor");
        investor_ids.push(investor.id);
    }

    let property = properties
        .create(CreatePropertyInput {
            title: "Seaside Villa".to_string(),
            location: "Lagos".to_string(),
            description: None,
            total_fractions: Some(1000),
            fraction_price: Some(dec!(50_000)),
            project_value: Some(dec!(50_000_000)),
        })
        .await
        .expect("create property");

    let stake_a = investments
        .assign(AssignInvestmentInput {
            user_id: investor_ids[0],
            property_id: property.id,
            fractions_owned: Some(300),
            initial_value: dec!(15_000_000),
        })
        .await
        .expect("assign stake a");
    let stake_b = investments
        .assign(AssignInvestmentInput {
            user_id: investor_ids[1],
            property_id: property.id,
            fractions_owned: Some(200),
            initial_value: dec!(10_000_000),
        })
        .await
        .expect("assign stake b");

    // A fraction-less stake in the same property must be skipped by
    // distribution runs without failing them. The repository refuses to
    // create one on a fractional property, so insert legacy data directly.
    let now = chrono::Utc::now().into();
    investments::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(investor_ids[2]),
        property_id: Set(property.id),
        fractions_owned: Set(None),
        initial_value: Set(dec!(1_000_000)),
        current_value: Set(dec!(1_000_000)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("insert flat stake");

    let period = revenue
        .create(CreateRevenueInput {
            property_id: property.id,
            month,
            year,
            gross_revenue: dec!(2_500_000),
            expenses: dec!(350_000),
            created_by: admin.id,
            notes: None,
        })
        .await
        .expect("create revenue period");

    Fixture {
        admin_id: admin.id,
        property_id: property.id,
        investment_a: stake_a.id,
        investment_b: stake_b.id,
        revenue_period_id: period.id,
    }
}

#[tokio::test]
async fn test_distribute_worked_example() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 1, 2031).await;
    let repo = DistributionRepository::new(db);

    let run = repo
        .distribute(fixture.revenue_period_id)
        .await
        .expect("distribute");

    assert!(run.revenue_period.distributed);
    assert!(run.revenue_period.distribution_date.is_some());
    assert_eq!(run.distributions.len(), 2);
    assert_eq!(run.total_distributed, dec!(1_075_000));

    let share_a = run
        .distributions
        .iter()
        .find(|d| d.investment_id == fixture.investment_a)
        .expect("share for stake a");
    assert_eq!(share_a.fractions_owned, 300);
    assert_eq!(share_a.ownership_percentage, dec!(30));
    assert_eq!(share_a.earnings_amount, dec!(645_000));
    assert_eq!(share_a.status, DistributionStatus::Pending);
    assert!(share_a.paid_date.is_none());

    let share_b = run
        .distributions
        .iter()
        .find(|d| d.investment_id == fixture.investment_b)
        .expect("share for stake b");
    assert_eq!(share_b.fractions_owned, 200);
    assert_eq!(share_b.ownership_percentage, dec!(20));
    assert_eq!(share_b.earnings_amount, dec!(430_000));
}

#[tokio::test]
async fn test_distribute_is_idempotent() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 2, 2031).await;
    let repo = DistributionRepository::new(db);

    let first = repo
        .distribute(fixture.revenue_period_id)
        .await
        .expect("first run");
    let mut first_ids: Vec<Uuid> = first.distributions.iter().map(|d| d.id).collect();
    first_ids.sort();

    let second = repo.distribute(fixture.revenue_period_id).await;
    assert!(matches!(
        second,
        Err(DistributionError::Domain(DomainError::AlreadyDistributed))
    ));

    // The failed second run left the row set untouched.
    let listing = repo
        .list(DistributionFilter {
            property_id: Some(fixture.property_id),
            status: None,
        })
        .await
        .expect("list");
    let mut stored_ids: Vec<Uuid> = listing
        .distributions
        .iter()
        .filter(|d| d.revenue_period_id == fixture.revenue_period_id)
        .map(|d| d.id)
        .collect();
    stored_ids.sort();
    assert_eq!(stored_ids, first_ids);
}

#[tokio::test]
async fn test_distribute_missing_period() {
    let Some(db) = test_db().await else { return };
    let repo = DistributionRepository::new(db);

    let missing = Uuid::new_v4();
    let result = repo.distribute(missing).await;
    assert!(matches!(
        result,
        Err(DistributionError::Domain(DomainError::RevenueNotFound(id))) if id == missing
    ));
}

#[tokio::test]
async fn test_distribute_rejects_non_fractional_property() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 11, 2031).await;

    // A whole-ownership property with a flat stake and a revenue period.
    let properties = PropertyRepository::new(db.clone());
    let investments = InvestmentRepository::new(db.clone());
    let revenue = RevenueRepository::new(db.clone());
    let property = properties
        .create(CreatePropertyInput {
            title: "Whole House".to_string(),
            location: "Nairobi".to_string(),
            description: None,
            total_fractions: None,
            fraction_price: None,
            project_value: None,
        })
        .await
        .expect("create property");
    let users = UserRepository::new(db.clone());
    let owner = users
        .create(CreateUserInput {
            email: format!("whole-owner-{}@example.com", Uuid::new_v4()),
            full_name: "Whole Owner".to_string(),
            phone: None,
            role: UserRole::Investor,
        })
        .await
        .expect("create owner");
    investments
        .assign(AssignInvestmentInput {
            user_id: owner.id,
            property_id: property.id,
            fractions_owned: None,
            initial_value: dec!(40_000_000),
        })
        .await
        .expect("assign flat stake");
    let period = revenue
        .create(CreateRevenueInput {
            property_id: property.id,
            month: 11,
            year: 2031,
            gross_revenue: dec!(900_000),
            expenses: dec!(200_000),
            created_by: fixture.admin_id,
            notes: None,
        })
        .await
        .expect("create revenue period");

    let repo = DistributionRepository::new(db);
    let result = repo.distribute(period.id).await;
    assert!(matches!(
        result,
        Err(DistributionError::Domain(DomainError::NotFractional))
    ));

    // The rejected run wrote nothing and left the period undistributed.
    let reloaded = revenue.find_by_id(period.id).await.expect("reload period");
    assert!(!reloaded.distributed);
    assert!(reloaded.distribution_date.is_none());
    let listing = repo
        .list(DistributionFilter {
            property_id: Some(property.id),
            status: None,
        })
        .await
        .expect("list");
    assert!(listing.distributions.is_empty());
}

#[tokio::test]
async fn test_distribute_rejects_no_recipients() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 3, 2031).await;

    // A second fractional property with revenue but no investments.
    let properties = PropertyRepository::new(db.clone());
    let revenue = RevenueRepository::new(db.clone());
    let property = properties
        .create(CreatePropertyInput {
            title: "Empty Tower".to_string(),
            location: "Accra".to_string(),
            description: None,
            total_fractions: Some(500),
            fraction_price: None,
            project_value: None,
        })
        .await
        .expect("create property");
    let period = revenue
        .create(CreateRevenueInput {
            property_id: property.id,
            month: 3,
            year: 2031,
            gross_revenue: dec!(1_000_000),
            expenses: dec!(100_000),
            created_by: fixture.admin_id,
            notes: None,
        })
        .await
        .expect("create revenue period");

    let repo = DistributionRepository::new(db);
    let result = repo.distribute(period.id).await;
    assert!(matches!(
        result,
        Err(DistributionError::Domain(DomainError::NoRecipients))
    ));
}

#[tokio::test]
async fn test_distribute_rejects_non_positive_income() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 4, 2031).await;

    let revenue = RevenueRepository::new(db.clone());
    let period = revenue
        .create(CreateRevenueInput {
            property_id: fixture.property_id,
            month: 5,
            year: 2031,
            gross_revenue: dec!(100_000),
            expenses: dec!(100_000),
            created_by: fixture.admin_id,
            notes: None,
        })
        .await
        .expect("create break-even period");

    let repo = DistributionRepository::new(db);
    let result = repo.distribute(period.id).await;
    assert!(matches!(
        result,
        Err(DistributionError::Domain(DomainError::NonPositiveIncome))
    ));
}

#[tokio::test]
async fn test_concurrent_runs_distribute_once() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 6, 2031).await;

    let repo_a = DistributionRepository::new(db.clone());
    let repo_b = DistributionRepository::new(db.clone());

    let (left, right) = futures::future::join(
        repo_a.distribute(fixture.revenue_period_id),
        repo_b.distribute(fixture.revenue_period_id),
    )
    .await;

    let successes = [left.is_ok(), right.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(successes, 1, "exactly one concurrent run may succeed");

    let repo = DistributionRepository::new(db);
    let listing = repo
        .list(DistributionFilter {
            property_id: Some(fixture.property_id),
            status: None,
        })
        .await
        .expect("list");
    // 300 + 200 fraction stakes, and only the winning run wrote rows for
    // this period alongside any earlier seeded periods of this property.
    assert_eq!(
        listing
            .distributions
            .iter()
            .filter(|d| d.revenue_period_id == fixture.revenue_period_id)
            .count(),
        2
    );
}

#[tokio::test]
async fn test_snapshot_survives_stake_changes() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 7, 2031).await;

    let repo = DistributionRepository::new(db.clone());
    let run = repo
        .distribute(fixture.revenue_period_id)
        .await
        .expect("distribute");
    let share_a = run
        .distributions
        .iter()
        .find(|d| d.investment_id == fixture.investment_a)
        .expect("share for stake a");

    // Changing the investment's valuation afterwards must not move the
    // recorded snapshot.
    let investments = InvestmentRepository::new(db);
    investments
        .update_valuation(fixture.investment_a, dec!(99_000_000))
        .await
        .expect("update valuation");

    let reloaded = repo.find_by_id(share_a.id).await.expect("reload");
    assert_eq!(reloaded.fractions_owned, 300);
    assert_eq!(reloaded.ownership_percentage, dec!(30));
    assert_eq!(reloaded.earnings_amount, dec!(645_000));
}

#[tokio::test]
async fn test_status_lifecycle_and_paid_date() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 8, 2031).await;

    let repo = DistributionRepository::new(db);
    let run = repo
        .distribute(fixture.revenue_period_id)
        .await
        .expect("distribute");
    let id = run.distributions[0].id;

    let paid = repo
        .update_status(
            id,
            StatusUpdate {
                status: CoreStatus::Paid,
                payment_reference: Some("TRX-1001".to_string()),
                notes: None,
            },
        )
        .await
        .expect("mark paid");
    assert_eq!(paid.status, DistributionStatus::Paid);
    assert_eq!(paid.payment_reference.as_deref(), Some("TRX-1001"));
    let first_paid_date = paid.paid_date.expect("paid date stamped");

    // Transitions are unrestricted; moving back keeps the paid date.
    let reverted = repo
        .update_status(
            id,
            StatusUpdate {
                status: CoreStatus::Pending,
                payment_reference: None,
                notes: None,
            },
        )
        .await
        .expect("revert to pending");
    assert_eq!(reverted.status, DistributionStatus::Pending);
    assert_eq!(reverted.paid_date, Some(first_paid_date));
    assert_eq!(reverted.payment_reference.as_deref(), Some("TRX-1001"));

    // Re-paying does not move the original paid date.
    let repaid = repo
        .update_status(
            id,
            StatusUpdate {
                status: CoreStatus::Paid,
                payment_reference: None,
                notes: Some("second payout attempt".to_string()),
            },
        )
        .await
        .expect("mark paid again");
    assert_eq!(repaid.paid_date, Some(first_paid_date));
}

#[tokio::test]
async fn test_investor_views() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 9, 2031).await;

    let repo = DistributionRepository::new(db.clone());
    repo.distribute(fixture.revenue_period_id)
        .await
        .expect("distribute");

    let investments = InvestmentRepository::new(db);
    let stake_a = investments
        .find_by_id(fixture.investment_a)
        .await
        .expect("stake a");

    let rows = repo
        .list_for_investor(stake_a.user_id)
        .await
        .expect("investor listing");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].property_title, "Seaside Villa");
    assert_eq!(rows[0].period, "Sep 2031");
    assert_eq!(rows[0].distribution.earnings_amount, dec!(645_000));

    let summary = repo
        .investor_summary(stake_a.user_id)
        .await
        .expect("investor summary");
    assert_eq!(summary.total_earnings, dec!(645_000));
    assert_eq!(summary.total_pending, dec!(645_000));
    assert_eq!(summary.total_paid, Decimal::ZERO);
    assert_eq!(summary.distributions_count, 1);
    assert_eq!(summary.properties_count, 1);

    // An investor with no distributions gets a zero summary, not an error.
    let empty = repo
        .investor_summary(Uuid::new_v4())
        .await
        .expect("empty summary");
    assert_eq!(empty.total_earnings, Decimal::ZERO);
    assert_eq!(empty.distributions_count, 0);
}

#[tokio::test]
async fn test_occupancy_does_not_gate_distribution() {
    let Some(db) = test_db().await else { return };
    let fixture = seed(&db, 10, 2031).await;

    // Occupancy is reporting data only; its presence or absence never
    // affects a distribution run.
    let occupancy = OccupancyRepository::new(db.clone());
    occupancy
        .create(CreateOccupancyInput {
            property_id: fixture.property_id,
            month: 10,
            year: 2031,
            nights_booked: 21,
            nights_available: 30,
            created_by: fixture.admin_id,
            notes: None,
        })
        .await
        .expect("create occupancy record");

    let repo = DistributionRepository::new(db);
    let run = repo
        .distribute(fixture.revenue_period_id)
        .await
        .expect("distribute");
    assert_eq!(run.distributions.len(), 2);
}
