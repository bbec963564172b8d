//! Table definitions for the drug inventory store.
//!
//! Creation only: statements are `IF NOT EXISTS`, existing tables are never altered.

pub(crate) const CREATE_SUPPLIERS: &str = r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        supplier_id  INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT NOT NULL,
        contact_name TEXT NOT NULL,
        phone        TEXT NOT NULL,
        email        TEXT NOT NULL UNIQUE,
        address      TEXT NOT NULL
    )
"#;

pub(crate) const CREATE_DRUGS: &str = r#"
    CREATE TABLE IF NOT EXISTS drugs (
        drug_id      INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT NOT NULL,
        batch_number TEXT UNIQUE NOT NULL,
        supplier_id  INTEGER,
        quantity     INTEGER NOT NULL CHECK (quantity >= 0),
        expiry_date  DATE NOT NULL,
        location     TEXT NOT NULL,
        status       TEXT CHECK (status IN ('In Stock', 'Out of Stock', 'Expired')),
        FOREIGN KEY (supplier_id) REFERENCES suppliers (supplier_id)
    )
"#;

pub(crate) const CREATE_SUPPLY_CHAIN: &str = r#"
    CREATE TABLE IF NOT EXISTS supply_chain (
        transaction_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        drug_id          INTEGER NOT NULL,
        supplier_id      INTEGER NOT NULL,
        transaction_type TEXT CHECK (transaction_type IN ('Received', 'Distributed')),
        quantity         INTEGER NOT NULL CHECK (quantity > 0),
        transaction_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        destination      TEXT,
        FOREIGN KEY (drug_id) REFERENCES drugs (drug_id),
        FOREIGN KEY (supplier_id) REFERENCES suppliers (supplier_id)
    )
"#;

// drug_id is nullable: rows written under the lenient unknown-batch policy carry NULL.
pub(crate) const CREATE_MONITORING_LOGS: &str = r#"
    CREATE TABLE IF NOT EXISTS monitoring_logs (
        log_id         INTEGER PRIMARY KEY AUTOINCREMENT,
        drug_id        INTEGER NULL,
        temperature    REAL NOT NULL,
        humidity       REAL NOT NULL,
        quality_status TEXT NOT NULL,
        timestamp      TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (drug_id) REFERENCES drugs (drug_id)
    )
"#;

/// In dependency order (referenced tables first).
pub(crate) const ALL_TABLES: [(&str, &str); 4] = [
    ("suppliers", CREATE_SUPPLIERS),
    ("drugs", CREATE_DRUGS),
    ("supply_chain", CREATE_SUPPLY_CHAIN),
    ("monitoring_logs", CREATE_MONITORING_LOGS),
];
