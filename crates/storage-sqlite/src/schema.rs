// Billfold database schema.

diesel::table! {
    users (id) {
        id -> Text,
        email -> Text,
        name -> Text,
        phone_number -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    reminder_settings (id) {
        id -> Text,
        user_id -> Text,
        local_notifications -> Bool,
        whatsapp_enabled -> Bool,
        call_enabled -> Bool,
        sms_enabled -> Bool,
        days_before -> Integer,
        preferred_time -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    bills (id) {
        id -> Text,
        user_id -> Text,
        account_name -> Text,
        name -> Text,
        amount -> Text,
        due_date -> Timestamp,
        category -> Text,
        frequency -> Text,
        is_paid -> Bool,
        notes -> Nullable<Text>,
        last_reminder_sent_on -> Nullable<Date>,
        enable_whatsapp -> Bool,
        enable_call -> Bool,
        enable_sms -> Bool,
        enable_local_notification -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    loan_details (id) {
        id -> Text,
        bill_id -> Text,
        total_amount -> Text,
        monthly_payment -> Text,
        total_installments -> Integer,
        installments_paid -> Integer,
        interest_rate_percent -> Text,
        is_active -> Bool,
    }
}

diesel::table! {
    payments (id) {
        id -> Text,
        bill_id -> Text,
        amount -> Text,
        payment_date -> Timestamp,
        payment_method -> Nullable<Text>,
        notes -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(reminder_settings -> users (user_id));
diesel::joinable!(bills -> users (user_id));
diesel::joinable!(loan_details -> bills (bill_id));
diesel::joinable!(payments -> bills (bill_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    reminder_settings,
    bills,
    loan_details,
    payments,
);
