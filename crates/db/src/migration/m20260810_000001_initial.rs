//! Initial database migration.
//!
//! Creates all enums, tables, constraints, and triggers for the investment
//! domain.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(PROPERTIES_SQL).await?;
        db.execute_unprepared(INVESTMENTS_SQL).await?;
        db.execute_unprepared(REVENUE_PERIODS_SQL).await?;
        db.execute_unprepared(OCCUPANCY_RECORDS_SQL).await?;
        db.execute_unprepared(EARNINGS_DISTRIBUTIONS_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM ('USER', 'INVESTOR', 'ADMIN');
CREATE TYPE property_status AS ENUM ('AVAILABLE', 'SOLD', 'INVESTED');
CREATE TYPE distribution_status AS ENUM ('PENDING', 'PAID', 'CANCELLED');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    full_name VARCHAR(255) NOT NULL,
    phone VARCHAR(32),
    role user_role NOT NULL DEFAULT 'USER',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_users_role ON users(role);
";

const PROPERTIES_SQL: &str = r"
CREATE TABLE properties (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(255) NOT NULL,
    location VARCHAR(255) NOT NULL,
    description TEXT,
    status property_status NOT NULL DEFAULT 'AVAILABLE',
    total_fractions INTEGER,
    fraction_price NUMERIC(15, 2),
    project_value NUMERIC(15, 2),
    fractions_sold INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- A property is fractional iff total_fractions is present and positive
    CONSTRAINT chk_total_fractions_positive
        CHECK (total_fractions IS NULL OR total_fractions > 0),
    CONSTRAINT chk_fractions_sold_within_supply
        CHECK (fractions_sold >= 0 AND
               (total_fractions IS NULL OR fractions_sold <= total_fractions))
);

CREATE INDEX idx_properties_status ON properties(status);
";

const INVESTMENTS_SQL: &str = r"
CREATE TABLE investments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    fractions_owned INTEGER,
    initial_value NUMERIC(15, 2) NOT NULL,
    current_value NUMERIC(15, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_fractions_owned_positive
        CHECK (fractions_owned IS NULL OR fractions_owned > 0)
);

CREATE INDEX idx_investments_user ON investments(user_id);
CREATE INDEX idx_investments_property ON investments(property_id);
";

const REVENUE_PERIODS_SQL: &str = r"
CREATE TABLE revenue_periods (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year INTEGER NOT NULL,
    gross_revenue NUMERIC(15, 2) NOT NULL CHECK (gross_revenue >= 0),
    expenses NUMERIC(15, 2) NOT NULL CHECK (expenses >= 0),
    distributed BOOLEAN NOT NULL DEFAULT FALSE,
    distribution_date TIMESTAMPTZ,
    created_by UUID NOT NULL REFERENCES users(id),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- At most one revenue record per property-month
    CONSTRAINT uq_revenue_periods_period UNIQUE (property_id, month, year)
);

CREATE INDEX idx_revenue_periods_property ON revenue_periods(property_id, year DESC, month DESC);
";

const OCCUPANCY_RECORDS_SQL: &str = r"
CREATE TABLE occupancy_records (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    property_id UUID NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year INTEGER NOT NULL,
    nights_booked INTEGER NOT NULL CHECK (nights_booked >= 0),
    nights_available INTEGER NOT NULL CHECK (nights_available >= 0),
    created_by UUID NOT NULL REFERENCES users(id),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_occupancy_records_period UNIQUE (property_id, month, year)
);

CREATE INDEX idx_occupancy_records_property ON occupancy_records(property_id, year DESC, month DESC);
";

const EARNINGS_DISTRIBUTIONS_SQL: &str = r"
CREATE TABLE earnings_distributions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    revenue_period_id UUID NOT NULL REFERENCES revenue_periods(id) ON DELETE CASCADE,
    investment_id UUID NOT NULL REFERENCES investments(id) ON DELETE CASCADE,
    -- Snapshot of ownership at distribution time
    fractions_owned INTEGER NOT NULL,
    ownership_percentage NUMERIC(8, 4) NOT NULL,
    earnings_amount NUMERIC(15, 2) NOT NULL,
    -- Payment tracking
    status distribution_status NOT NULL DEFAULT 'PENDING',
    paid_date TIMESTAMPTZ,
    payment_reference VARCHAR(255),
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- One distribution row per (period, investment); makes a double
    -- distribution run fail the constraint instead of duplicating rows
    CONSTRAINT uq_earnings_distributions_run UNIQUE (revenue_period_id, investment_id)
);

CREATE INDEX idx_earnings_distributions_investment ON earnings_distributions(investment_id, created_at DESC);
CREATE INDEX idx_earnings_distributions_status ON earnings_distributions(status);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_properties_updated_at
    BEFORE UPDATE ON properties
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_investments_updated_at
    BEFORE UPDATE ON investments
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_revenue_periods_updated_at
    BEFORE UPDATE ON revenue_periods
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_occupancy_records_updated_at
    BEFORE UPDATE ON occupancy_records
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_earnings_distributions_updated_at
    BEFORE UPDATE ON earnings_distributions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS earnings_distributions CASCADE;
DROP TABLE IF EXISTS occupancy_records CASCADE;
DROP TABLE IF EXISTS revenue_periods CASCADE;
DROP TABLE IF EXISTS investments CASCADE;
DROP TABLE IF EXISTS properties CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP FUNCTION IF EXISTS set_updated_at();
DROP TYPE IF EXISTS distribution_status;
DROP TYPE IF EXISTS property_status;
DROP TYPE IF EXISTS user_role;
";
