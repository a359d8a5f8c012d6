//! Database models for bills and payments.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::users::UserDB;
use billfold_core::bills::{Bill, BillFrequency, NewBill, Payment, ReminderPreferences};
use billfold_core::errors::{Error, ValidationError};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, Associations, Debug, Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(table_name = crate::schema::bills)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BillDB {
    pub id: String,
    pub user_id: String,
    pub account_name: String,
    pub name: String,
    pub amount: String,
    pub due_date: NaiveDateTime,
    pub category: String,
    pub frequency: String,
    pub is_paid: bool,
    pub notes: Option<String>,
    pub last_reminder_sent_on: Option<NaiveDate>,
    pub enable_whatsapp: bool,
    pub enable_call: bool,
    pub enable_sms: bool,
    pub enable_local_notification: bool,
    pub created_at: NaiveDateTime,
}

impl BillDB {
    /// Build an insertable row from a creation payload.
    pub fn from_new(owner_id: &str, new_bill: &NewBill) -> Self {
        let prefs = new_bill.reminder_preferences.unwrap_or_default();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: owner_id.to_string(),
            account_name: new_bill.account_name.clone(),
            name: new_bill.name.clone(),
            amount: new_bill.amount.to_string(),
            due_date: new_bill.due_date,
            category: new_bill
                .category
                .clone()
                .unwrap_or_else(|| "general".to_string()),
            frequency: new_bill.frequency.unwrap_or_default().as_str().to_string(),
            is_paid: false,
            notes: new_bill.notes.clone(),
            last_reminder_sent_on: None,
            enable_whatsapp: prefs.enable_whatsapp,
            enable_call: prefs.enable_call,
            enable_sms: prefs.enable_sms,
            enable_local_notification: prefs.enable_local_notification,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<BillDB> for Bill {
    type Error = Error;

    fn try_from(db: BillDB) -> Result<Self, Self::Error> {
        let amount = db.amount.parse::<Decimal>()?;
        let frequency = BillFrequency::parse(&db.frequency).ok_or_else(|| {
            ValidationError::InvalidInput(format!("Unknown bill frequency '{}'", db.frequency))
        })?;
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            account_name: db.account_name,
            name: db.name,
            amount,
            due_date: db.due_date,
            category: db.category,
            frequency,
            is_paid: db.is_paid,
            notes: db.notes,
            last_reminder_sent_on: db.last_reminder_sent_on,
            reminder_preferences: ReminderPreferences {
                enable_whatsapp: db.enable_whatsapp,
                enable_call: db.enable_call,
                enable_sms: db.enable_sms,
                enable_local_notification: db.enable_local_notification,
            },
            created_at: db.created_at,
        })
    }
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentDB {
    pub id: String,
    pub bill_id: String,
    pub amount: String,
    pub payment_date: NaiveDateTime,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl PaymentDB {
    /// Audit row for a bill that just transitioned to paid.
    pub fn for_bill(bill: &BillDB, method: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            bill_id: bill.id.clone(),
            amount: bill.amount.clone(),
            payment_date: now,
            payment_method: Some(method.to_string()),
            notes: None,
            created_at: now,
        }
    }
}

impl TryFrom<PaymentDB> for Payment {
    type Error = Error;

    fn try_from(db: PaymentDB) -> Result<Self, Self::Error> {
        let amount = db.amount.parse::<Decimal>()?;
        Ok(Self {
            id: db.id,
            bill_id: db.bill_id,
            amount,
            payment_date: db.payment_date,
            payment_method: db.payment_method,
            notes: db.notes,
            created_at: db.created_at,
        })
    }
}
