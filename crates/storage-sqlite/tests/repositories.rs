//! Repository round-trips against a real on-disk SQLite database.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

use billfold_core::bills::{BillRepositoryTrait, BillUpdate, NewBill, ReminderPreferences};
use billfold_core::loans::{LoanRepositoryTrait, NewLoanDetails};
use billfold_core::settings::{ReminderSettingsRepositoryTrait, ReminderSettingsUpdate};
use billfold_core::users::UserRepositoryTrait;
use billfold_storage_sqlite::bills::BillRepository;
use billfold_storage_sqlite::loans::LoanRepository;
use billfold_storage_sqlite::settings::ReminderSettingsRepository;
use billfold_storage_sqlite::users::{UserDB, UserRepository};
use billfold_storage_sqlite::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbPool, WriteHandle,
};

struct TestDb {
    // Held so the directory outlives the pool.
    _dir: tempfile::TempDir,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("billfold-test.db");
    let path = init(db_path.to_str().unwrap()).unwrap();
    let pool = create_pool(&path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

fn seed_user(pool: &Arc<DbPool>, phone: Option<&str>) -> String {
    let user = UserDB {
        id: Uuid::new_v4().to_string(),
        email: format!("{}@example.com", Uuid::new_v4()),
        name: "Priya".to_string(),
        phone_number: phone.map(str::to_string),
        created_at: Utc::now().naive_utc(),
    };
    let mut conn = get_connection(pool).unwrap();
    diesel::insert_into(billfold_storage_sqlite::schema::users::table)
        .values(&user)
        .execute(&mut conn)
        .unwrap();
    user.id
}

fn new_bill(name: &str, due: NaiveDate) -> NewBill {
    NewBill {
        account_name: "HDFC".to_string(),
        name: name.to_string(),
        amount: dec!(1499.50),
        due_date: due.and_time(NaiveTime::MIN),
        category: Some("utilities".to_string()),
        frequency: None,
        notes: None,
        reminder_preferences: Some(ReminderPreferences::default()),
        loan_details: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_bill_create_and_fetch_round_trip() {
    let db = setup();
    let user_id = seed_user(&db.pool, Some("9876543210"));
    let repo = BillRepository::new(db.pool.clone(), db.writer.clone());

    let created = repo
        .create(&user_id, new_bill("Electricity", date(2025, 3, 10)))
        .await
        .unwrap();

    let fetched = repo.get_for_user(&user_id, &created.id).unwrap();
    assert_eq!(fetched.name, "Electricity");
    assert_eq!(fetched.amount, dec!(1499.50));
    assert!(!fetched.is_paid);
    assert!(fetched.last_reminder_sent_on.is_none());

    // A foreign caller must not see the bill.
    let err = repo.get_for_user("someone-else", &created.id).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_mark_paid_is_idempotent_and_audited() {
    let db = setup();
    let user_id = seed_user(&db.pool, None);
    let repo = BillRepository::new(db.pool.clone(), db.writer.clone());

    let bill = repo
        .create(&user_id, new_bill("Rent", date(2025, 4, 1)))
        .await
        .unwrap();

    let paid = repo.mark_paid(&user_id, &bill.id, "manual").await.unwrap();
    assert!(paid.is_paid);

    // Second call leaves the audit trail untouched.
    repo.mark_paid(&user_id, &bill.id, "manual").await.unwrap();
    let trail = repo.list_payments(&user_id, &bill.id).unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].amount, dec!(1499.50));
    assert_eq!(trail[0].payment_method.as_deref(), Some("manual"));
}

#[tokio::test]
async fn test_unpaid_duplicate_guard_sees_generated_instances() {
    let db = setup();
    let user_id = seed_user(&db.pool, None);
    let repo = BillRepository::new(db.pool.clone(), db.writer.clone());

    let due = date(2025, 2, 15).and_time(NaiveTime::MIN);
    assert!(!repo
        .unpaid_duplicate_exists(&user_id, "Electricity", due)
        .unwrap());

    repo.create(&user_id, new_bill("Electricity", date(2025, 2, 15)))
        .await
        .unwrap();
    assert!(repo
        .unpaid_duplicate_exists(&user_id, "Electricity", due)
        .unwrap());
}

#[tokio::test]
async fn test_last_reminder_marker_round_trip() {
    let db = setup();
    let user_id = seed_user(&db.pool, None);
    let repo = BillRepository::new(db.pool.clone(), db.writer.clone());

    let bill = repo
        .create(&user_id, new_bill("Broadband", date(2025, 3, 10)))
        .await
        .unwrap();
    repo.set_last_reminder_sent_on(&bill.id, date(2025, 3, 7))
        .await
        .unwrap();

    let fetched = repo.get_for_user(&user_id, &bill.id).unwrap();
    assert_eq!(fetched.last_reminder_sent_on, Some(date(2025, 3, 7)));
    // The free-text notes column is untouched by the marker.
    assert!(fetched.notes.is_none());
}

#[tokio::test]
async fn test_update_nested_reminder_preferences() {
    let db = setup();
    let user_id = seed_user(&db.pool, None);
    let repo = BillRepository::new(db.pool.clone(), db.writer.clone());

    let bill = repo
        .create(&user_id, new_bill("Gym", date(2025, 5, 1)))
        .await
        .unwrap();

    let update = BillUpdate {
        amount: Some(dec!(999)),
        reminder_preferences: Some(billfold_core::bills::ReminderPreferencesUpdate {
            enable_call: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let updated = repo.update(&user_id, &bill.id, update).await.unwrap();
    assert_eq!(updated.amount, dec!(999));
    assert!(updated.reminder_preferences.enable_call);
    assert!(updated.reminder_preferences.enable_whatsapp);
}

#[tokio::test]
async fn test_loan_lifecycle() {
    let db = setup();
    let user_id = seed_user(&db.pool, None);
    let bill_repo = BillRepository::new(db.pool.clone(), db.writer.clone());
    let loan_repo = LoanRepository::new(db.pool.clone(), db.writer.clone());

    let mut payload = new_bill("Car loan", date(2025, 3, 5));
    payload.category = Some("loan".to_string());
    payload.loan_details = Some(NewLoanDetails {
        total_amount: dec!(3000),
        monthly_payment: dec!(1000),
        total_installments: 3,
        installments_paid: Some(2),
        interest_rate_percent: None,
    });
    bill_repo.create(&user_id, payload).await.unwrap();

    let loans = loan_repo.list_active_by_user(&user_id).unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].amount_remaining, dec!(1000));

    let (loan, owner) = loan_repo.get_with_owner(&loans[0].id).unwrap();
    assert_eq!(owner, user_id);

    // Final installment deactivates the loan; a further payment is rejected.
    let updated = loan_repo.increment_installments_paid(&loan.id).await.unwrap();
    assert_eq!(updated.installments_paid, 3);
    assert!(!updated.is_active);
    assert!(loan_repo
        .increment_installments_paid(&loan.id)
        .await
        .is_err());
    assert!(loan_repo.list_active_by_user(&user_id).unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_defaults_and_update() {
    let db = setup();
    let user_id = seed_user(&db.pool, None);
    let repo = ReminderSettingsRepository::new(db.pool.clone(), db.writer.clone());

    assert!(repo.get_by_user(&user_id).unwrap().is_none());

    let defaults = repo.create_defaults(&user_id).await.unwrap();
    assert_eq!(defaults.preferred_time, "09:00");
    assert!(defaults.whatsapp_enabled);

    let updated = repo
        .update(
            &user_id,
            ReminderSettingsUpdate {
                preferred_time: Some("21:15".to_string()),
                call_enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.preferred_time, "21:15");
    assert!(!updated.call_enabled);

    let fetched = repo.get_by_user(&user_id).unwrap().unwrap();
    assert_eq!(fetched.preferred_time, "21:15");
}

#[tokio::test]
async fn test_user_listing_requires_phone_number() {
    let db = setup();
    seed_user(&db.pool, Some("9876543210"));
    seed_user(&db.pool, None);
    seed_user(&db.pool, Some(""));

    let repo = UserRepository::new(db.pool.clone());
    let eligible = repo.list_with_phone_number().unwrap();
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].contact_number(), Some("9876543210"));
}
