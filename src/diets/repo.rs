use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::nutrition;

use super::dto::{DayView, DietSummary, DietView, FoodEntryView, MealDraft, MealView};

fn check_day(day: i64) -> AppResult<()> {
    if !(1..=7).contains(&day) {
        return Err(AppError::Validation(format!(
            "day_of_week must be between 1 and 7, got {day}"
        )));
    }
    Ok(())
}

fn check_drafts(meals: &[MealDraft]) -> AppResult<()> {
    for draft in meals {
        check_day(draft.day_of_week)?;
    }
    Ok(())
}

pub async fn create(db: &SqlitePool, owner_id: i64, name: &str) -> AppResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO diets (owner_id, name, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(owner_id)
    .bind(name)
    .bind(OffsetDateTime::now_utc())
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Inserts a diet and its whole meal tree in one transaction. Day-of-week
/// validation happens before the first write; any storage failure rolls the
/// entire subtree back.
pub async fn create_full(
    db: &SqlitePool,
    owner_id: i64,
    name: &str,
    meals: &[MealDraft],
) -> AppResult<i64> {
    check_drafts(meals)?;

    let mut tx = db.begin().await?;
    let diet_id = sqlx::query(
        r#"
        INSERT INTO diets (owner_id, name, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(owner_id)
    .bind(name)
    .bind(OffsetDateTime::now_utc())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    insert_meal_drafts(&mut tx, diet_id, meals).await?;
    tx.commit().await?;

    debug!(diet_id, owner_id, meals = meals.len(), "diet created");
    Ok(diet_id)
}

/// Wipe-and-replace update of a diet's whole structure. Returns `false`
/// without writing anything when the diet does not exist or belongs to a
/// different owner; the two cases are indistinguishable on purpose.
pub async fn replace_full(
    db: &SqlitePool,
    diet_id: i64,
    owner_id: i64,
    name: &str,
    meals: &[MealDraft],
) -> AppResult<bool> {
    let mut tx = db.begin().await?;
    let owned: Option<(i64,)> = sqlx::query_as("SELECT id FROM diets WHERE id = ? AND owner_id = ?")
        .bind(diet_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?;
    if owned.is_none() {
        return Ok(false);
    }

    // ownership settled; structural validation still precedes any write
    check_drafts(meals)?;

    sqlx::query("UPDATE diets SET name = ? WHERE id = ?")
        .bind(name)
        .bind(diet_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM meal_items WHERE meal_id IN (SELECT id FROM meals WHERE diet_id = ?)")
        .bind(diet_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM meals WHERE diet_id = ?")
        .bind(diet_id)
        .execute(&mut *tx)
        .await?;

    insert_meal_drafts(&mut tx, diet_id, meals).await?;
    tx.commit().await?;

    debug!(diet_id, owner_id, "diet structure replaced");
    Ok(true)
}

/// Cascade-deletes food entries, meals, then the diet row, all scoped by
/// ownership. Returns whether a diet row was actually removed.
pub async fn delete(db: &SqlitePool, diet_id: i64, owner_id: i64) -> AppResult<bool> {
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM meal_items WHERE meal_id IN (
            SELECT m.id FROM meals m
            JOIN diets d ON d.id = m.diet_id
            WHERE d.id = ? AND d.owner_id = ?
        )
        "#,
    )
    .bind(diet_id)
    .bind(owner_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        DELETE FROM meals WHERE diet_id IN (
            SELECT id FROM diets WHERE id = ? AND owner_id = ?
        )
        "#,
    )
    .bind(diet_id)
    .bind(owner_id)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query("DELETE FROM diets WHERE id = ? AND owner_id = ?")
        .bind(diet_id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_for_owner(db: &SqlitePool, owner_id: i64) -> AppResult<Vec<DietSummary>> {
    let rows = sqlx::query_as::<_, DietSummary>(
        r#"
        SELECT id, owner_id, name, created_at
        FROM diets
        WHERE owner_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[derive(Debug, FromRow)]
struct MealRow {
    id: i64,
    day_of_week: i64,
    name: String,
    ordering: i64,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    food_code: String,
    grams: i64,
    food_name: Option<String>,
}

/// Expands a diet into its 7-day view, with per-entry display names and
/// macro totals. `NotFound` covers both "no such diet" and "not yours".
pub async fn get_full(db: &SqlitePool, diet_id: i64, owner_id: i64) -> AppResult<DietView> {
    let diet: Option<DietSummary> = sqlx::query_as(
        r#"
        SELECT id, owner_id, name, created_at
        FROM diets
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(diet_id)
    .bind(owner_id)
    .fetch_optional(db)
    .await?;
    let Some(diet) = diet else {
        return Err(AppError::NotFound);
    };

    let meals = sqlx::query_as::<_, MealRow>(
        r#"
        SELECT id, day_of_week, name, ordering
        FROM meals
        WHERE diet_id = ?
        ORDER BY day_of_week ASC, ordering ASC, id ASC
        "#,
    )
    .bind(diet_id)
    .fetch_all(db)
    .await?;

    let mut days: Vec<DayView> = (1..=7)
        .map(|day_of_week| DayView {
            day_of_week,
            meals: Vec::new(),
        })
        .collect();

    for meal in meals {
        let items = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT i.id, i.food_code, i.grams, f.name AS food_name
            FROM meal_items i
            LEFT JOIN foods f ON f.code = i.food_code
            WHERE i.meal_id = ?
            ORDER BY i.id ASC
            "#,
        )
        .bind(meal.id)
        .fetch_all(db)
        .await?;

        let mut foods = Vec::with_capacity(items.len());
        for item in items {
            let macros = nutrition::food_macros(db, &item.food_code, item.grams as f64).await?;
            foods.push(FoodEntryView {
                id: item.id,
                name: item.food_name.unwrap_or_else(|| item.food_code.clone()),
                food_code: item.food_code,
                grams: item.grams,
                macros,
            });
        }

        let slot = (meal.day_of_week - 1) as usize;
        if let Some(day) = days.get_mut(slot) {
            day.meals.push(MealView {
                id: meal.id,
                name: meal.name,
                order: meal.ordering,
                foods,
            });
        }
    }

    Ok(DietView {
        id: diet.id,
        name: diet.name,
        created_at: diet.created_at,
        days,
    })
}

pub async fn add_meal(
    db: &SqlitePool,
    diet_id: i64,
    day_of_week: i64,
    name: &str,
    ordering: i64,
) -> AppResult<i64> {
    check_day(day_of_week)?;

    let result = sqlx::query(
        r#"
        INSERT INTO meals (diet_id, day_of_week, name, ordering)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(diet_id)
    .bind(day_of_week)
    .bind(name)
    .bind(ordering)
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn add_food_entry(
    db: &SqlitePool,
    meal_id: i64,
    food_code: &str,
    grams: i64,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO meal_items (meal_id, food_code, grams)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(meal_id)
    .bind(food_code)
    .bind(grams)
    .execute(db)
    .await?;
    Ok(())
}

/// Copies every meal of the source day (and its food entries) onto the
/// target day as fresh rows, preserving name and ordering. Pure append:
/// existing target-day meals stay, and source == target doubles the day.
pub async fn duplicate_day(
    db: &SqlitePool,
    diet_id: i64,
    source_day: i64,
    target_day: i64,
) -> AppResult<()> {
    check_day(source_day)?;
    check_day(target_day)?;

    let mut tx = db.begin().await?;

    // Snapshot before inserting so copying a day onto itself terminates.
    let source_meals: Vec<(i64, String, i64)> = sqlx::query_as(
        r#"
        SELECT id, name, ordering
        FROM meals
        WHERE diet_id = ? AND day_of_week = ?
        ORDER BY ordering ASC, id ASC
        "#,
    )
    .bind(diet_id)
    .bind(source_day)
    .fetch_all(&mut *tx)
    .await?;

    for (source_meal_id, name, ordering) in source_meals {
        let new_meal_id = sqlx::query(
            r#"
            INSERT INTO meals (diet_id, day_of_week, name, ordering)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(diet_id)
        .bind(target_day)
        .bind(&name)
        .bind(ordering)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let items: Vec<(String, i64)> =
            sqlx::query_as("SELECT food_code, grams FROM meal_items WHERE meal_id = ?")
                .bind(source_meal_id)
                .fetch_all(&mut *tx)
                .await?;

        for (food_code, grams) in items {
            sqlx::query("INSERT INTO meal_items (meal_id, food_code, grams) VALUES (?, ?, ?)")
                .bind(new_meal_id)
                .bind(food_code)
                .bind(grams)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

async fn insert_meal_drafts(
    tx: &mut Transaction<'_, Sqlite>,
    diet_id: i64,
    meals: &[MealDraft],
) -> AppResult<()> {
    for (position, draft) in meals.iter().enumerate() {
        let ordering = match draft.order {
            Some(order) if order > 0 => order,
            _ => position as i64 + 1,
        };

        let meal_id = sqlx::query(
            r#"
            INSERT INTO meals (diet_id, day_of_week, name, ordering)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(diet_id)
        .bind(draft.day_of_week)
        .bind(&draft.name)
        .bind(ordering)
        .execute(&mut **tx)
        .await?
        .last_insert_rowid();

        for food in &draft.foods {
            sqlx::query("INSERT INTO meal_items (meal_id, food_code, grams) VALUES (?, ?, ?)")
                .bind(meal_id)
                .bind(&food.food_code)
                .bind(food.grams)
                .execute(&mut **tx)
                .await?;
        }
    }
    Ok(())
}
