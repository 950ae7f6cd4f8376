use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{Days, Utc};
use uuid::Uuid;

use studio_booking_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let staff_id = ensure_user(&pool, "studio@example.com", "studio123").await?;
    seed_bookings(&pool).await?;

    println!("Seed completed. Staff ID: {staff_id}");
    Ok(())
}

async fn ensure_user(pool: &sqlx::PgPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, 'staff')
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_bookings(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let bookings = vec![
        // (client, phone, type, event day offset, total, advance)
        ("Asha Verma", "+919812345678", "Wedding", 1i64, 85000i64, 25000i64),
        ("Ravi Kumar", "+917000000000", "Birthday", 0, 12000, 12000),
        ("Meera Joshi", "+919900112233", "Maternity", 20, 18000, 0),
    ];

    for (client_name, phone, event_type, offset, total, advance) in bookings {
        let event_date = today + Days::new(offset as u64);
        let events = serde_json::json!([{
            "date": event_date,
            "time": "10:00",
            "location": "Indore",
            "function_name": event_type,
        }]);
        let history = if advance > 0 {
            serde_json::json!([{ "amount": advance, "date": today, "mode": "Cash" }])
        } else {
            serde_json::json!([])
        };
        let balance = (total - advance).max(0);
        let status = if balance == 0 {
            "paid"
        } else if advance > 0 {
            "advance"
        } else {
            "pending"
        };

        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, client_name, phone, event_type, events,
                 total_amount, advance_paid, balance, payment_history, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_name)
        .bind(phone)
        .bind(event_type)
        .bind(events)
        .bind(total)
        .bind(advance)
        .bind(balance)
        .bind(history)
        .bind(status)
        .execute(pool)
        .await?;
    }

    println!("Seeded bookings");
    Ok(())
}
