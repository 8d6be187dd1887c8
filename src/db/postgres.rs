use crate::models::weather::{DeviceHealth, Observation};
use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Resolves the active station registered to a sender phone number.
pub async fn station_by_phone(pool: &PgPool, phone: &str) -> Result<Option<i64>> {
    let row = sqlx::query(
        r#"SELECT id FROM station WHERE mobile_number = $1 AND is_active = TRUE LIMIT 1"#,
    )
    .bind(phone)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(r) => Ok(Some(r.try_get("id")?)),
        None => Ok(None),
    }
}

pub async fn insert_observation(pool: &PgPool, station_id: i64, obs: &Observation) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO observation
            (station_id, timestamp, temp, rh, pres, wspd, wspdx, wdir, srad, td, wchill, rr)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(station_id)
    .bind(obs.timestamp)
    .bind(obs.temp)
    .bind(obs.rh)
    .bind(obs.pres)
    .bind(obs.wspd)
    .bind(obs.wspdx)
    .bind(obs.wdir)
    .bind(obs.srad)
    .bind(obs.td)
    .bind(obs.wchill)
    .bind(obs.rr)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_health(pool: &PgPool, station_id: i64, health: &DeviceHealth) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO device_health
            (station_id, timestamp, vb1, vb2, curr, bp1, bp2, cm, ss, temp_arq, rh_arq, fpm,
             message, error_msg, minutes_difference, data_count, data_status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        "#,
    )
    .bind(station_id)
    .bind(health.timestamp)
    .bind(health.vb1)
    .bind(health.vb2)
    .bind(health.curr)
    .bind(health.bp1)
    .bind(health.bp2)
    .bind(health.cm.as_deref())
    .bind(health.ss)
    .bind(health.temp_arq)
    .bind(health.rh_arq)
    .bind(health.fpm.as_deref())
    .bind(&health.message)
    .bind(&health.error_msg)
    .bind(health.minutes_difference)
    .bind(i16::from(health.data_count))
    .bind(&health.data_status)
    .execute(pool)
    .await?;
    Ok(())
}
