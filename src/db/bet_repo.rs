use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::errors::BetError;
use crate::models::{BetRecord, NewBet, Outcome};

/// Insert a new pending bet. `resulting_bankroll` starts equal to `bankroll`.
pub async fn insert_bet(pool: &SqlitePool, bet: &NewBet) -> Result<BetRecord, BetError> {
    let record = sqlx::query_as::<_, BetRecord>(
        r#"
        INSERT INTO bets (created_at, bankroll, odds, win_probability, stake,
                          potential_gain, outcome, resulting_bankroll)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?2)
        RETURNING *
        "#,
    )
    .bind(bet.created_at)
    .bind(bet.bankroll.to_string())
    .bind(bet.odds.to_string())
    .bind(bet.win_probability.to_string())
    .bind(bet.stake.to_string())
    .bind(bet.potential_gain.to_string())
    .bind(Outcome::Pending.as_str())
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// All bets in insertion order.
pub async fn list_bets(pool: &SqlitePool) -> Result<Vec<BetRecord>, BetError> {
    let bets = sqlx::query_as::<_, BetRecord>("SELECT * FROM bets ORDER BY id ASC")
        .fetch_all(pool)
        .await?;

    Ok(bets)
}

pub async fn get_bet(pool: &SqlitePool, id: i64) -> Result<BetRecord, BetError> {
    sqlx::query_as::<_, BetRecord>("SELECT * FROM bets WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(BetError::NotFound(id))
}

/// Record an outcome and the bankroll it produces.
pub async fn update_outcome(
    pool: &SqlitePool,
    id: i64,
    outcome: Outcome,
    resulting_bankroll: Decimal,
) -> Result<(), BetError> {
    let result = sqlx::query(
        "UPDATE bets SET outcome = ?1, resulting_bankroll = ?2 WHERE id = ?3",
    )
    .bind(outcome.as_str())
    .bind(resulting_bankroll.to_string())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BetError::NotFound(id));
    }

    Ok(())
}

/// Delete a bet. Deleting an unknown id is not an error.
pub async fn delete_bet(pool: &SqlitePool, id: i64) -> Result<bool, BetError> {
    let result = sqlx::query("DELETE FROM bets WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::db::init_pool;

    fn sample_bet() -> NewBet {
        NewBet {
            created_at: Utc::now(),
            bankroll: Decimal::from(1000),
            odds: Decimal::new(128, 2),
            win_probability: Decimal::new(90, 2),
            stake: Decimal::new(10000, 2),
            potential_gain: Decimal::new(280000, 4),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let pool = init_pool("sqlite::memory:", 1).await.unwrap();

        let a = insert_bet(&pool, &sample_bet()).await.unwrap();
        let b = insert_bet(&pool, &sample_bet()).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(a.outcome, Outcome::Pending);
        assert_eq!(a.resulting_bankroll, a.bankroll);
    }

    #[tokio::test]
    async fn test_decimal_text_round_trip() {
        let pool = init_pool("sqlite::memory:", 1).await.unwrap();
        let inserted = insert_bet(&pool, &sample_bet()).await.unwrap();
        let fetched = get_bet(&pool, inserted.id).await.unwrap();

        assert_eq!(fetched, inserted);
        assert_eq!(fetched.potential_gain.to_string(), "28.0000");
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let pool = init_pool("sqlite::memory:", 1).await.unwrap();

        let err = update_outcome(&pool, 99, Outcome::Won, Decimal::ONE).await.unwrap_err();
        assert!(matches!(err, BetError::NotFound(99)));

        assert!(!delete_bet(&pool, 99).await.unwrap());
    }

    #[tokio::test]
    async fn test_outcome_check_constraint() {
        let pool = init_pool("sqlite::memory:", 1).await.unwrap();
        let bet = insert_bet(&pool, &sample_bet()).await.unwrap();

        let res = sqlx::query("UPDATE bets SET outcome = 'void' WHERE id = ?1")
            .bind(bet.id)
            .execute(&pool)
            .await;
        assert!(res.is_err());
    }
}
