use crate::domain::{
    models::{entry::{AssignmentRow, CalendarEntry, EntryRow, ScheduledEntry}, person::Person},
    ports::EntryRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

const SELECT_ENTRIES: &str =
    "SELECT e.*, l.company AS lead_name FROM calendar_entries e LEFT JOIN leads l ON l.id = e.lead_id";

pub struct SqliteEntryRepo {
    pool: SqlitePool,
}

impl SqliteEntryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert_participants(tx: &mut Transaction<'_, Sqlite>, entry_id: &str, participants: &[Person]) -> Result<(), AppError> {
        for person in participants {
            sqlx::query("INSERT INTO calendar_entry_participants (entry_id, person_id) VALUES (?, ?)")
                .bind(entry_id)
                .bind(person.id())
                .execute(&mut **tx)
                .await
                .map_err(AppError::Database)?;
        }
        Ok(())
    }

    async fn load_assignments(tx: &mut Transaction<'_, Sqlite>, rows: &[EntryRow]) -> Result<Vec<AssignmentRow>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT entry_id, person_id FROM calendar_entry_participants WHERE entry_id IN ("
        );
        let mut ids = builder.separated(", ");
        for row in rows {
            ids.push_bind(&row.entry.id);
        }
        ids.push_unseparated(")");

        builder.build_query_as::<AssignmentRow>()
            .fetch_all(&mut **tx)
            .await
            .map_err(AppError::Database)
    }
}

#[async_trait]
impl EntryRepository for SqliteEntryRepo {
    async fn list_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ScheduledEntry>, AppError> {
        // Entries and assignments are read in one transaction so a concurrent
        // replace of the participant set is never seen half-applied.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "{} WHERE e.date >= ? AND e.date <= ? ORDER BY e.date ASC, e.start_time ASC, e.id ASC",
            SELECT_ENTRIES
        ))
            .bind(from)
            .bind(to)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let assignments = Self::load_assignments(&mut tx, &rows).await?;
        tx.commit().await.map_err(AppError::Database)?;

        Ok(ScheduledEntry::assemble(rows, assignments))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduledEntry>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let rows = sqlx::query_as::<_, EntryRow>(&format!("{} WHERE e.id = ?", SELECT_ENTRIES))
            .bind(id)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let assignments = Self::load_assignments(&mut tx, &rows).await?;
        tx.commit().await.map_err(AppError::Database)?;

        Ok(ScheduledEntry::assemble(rows, assignments).pop())
    }

    async fn create(&self, entry: &CalendarEntry, participants: &[Person]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            r#"INSERT INTO calendar_entries (id, date, title, start_time, end_time, lead_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#
        )
            .bind(&entry.id)
            .bind(entry.date)
            .bind(&entry.title)
            .bind(entry.start_time)
            .bind(entry.end_time)
            .bind(&entry.lead_id)
            .bind(entry.created_at)
            .bind(entry.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        Self::insert_participants(&mut tx, &entry.id, participants).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn update(&self, entry: &CalendarEntry, participants: &[Person]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query(
            r#"UPDATE calendar_entries SET date=?, title=?, start_time=?, end_time=?, lead_id=?, updated_at=?
               WHERE id=?"#
        )
            .bind(entry.date)
            .bind(&entry.title)
            .bind(entry.start_time)
            .bind(entry.end_time)
            .bind(&entry.lead_id)
            .bind(entry.updated_at)
            .bind(&entry.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Entry not found".into()));
        }

        sqlx::query("DELETE FROM calendar_entry_participants WHERE entry_id = ?")
            .bind(&entry.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        Self::insert_participants(&mut tx, &entry.id, participants).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM calendar_entry_participants WHERE entry_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM calendar_entries WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn assignments_for(&self, entry_id: &str) -> Result<Vec<Person>, AppError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            "SELECT entry_id, person_id FROM calendar_entry_participants WHERE entry_id = ?"
        )
            .bind(entry_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut people: Vec<Person> = rows.iter().filter_map(|r| Person::from_id(&r.person_id)).collect();
        people.sort();
        Ok(people)
    }

    async fn list_for_person(&self, person: Person, from: NaiveDate, to: NaiveDate) -> Result<Vec<ScheduledEntry>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "{} WHERE e.date >= ? AND e.date <= ?
               AND e.id IN (SELECT entry_id FROM calendar_entry_participants WHERE person_id = ?)
             ORDER BY e.date ASC, e.start_time ASC, e.id ASC",
            SELECT_ENTRIES
        ))
            .bind(from)
            .bind(to)
            .bind(person.id())
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let assignments = Self::load_assignments(&mut tx, &rows).await?;
        tx.commit().await.map_err(AppError::Database)?;

        Ok(ScheduledEntry::assemble(rows, assignments))
    }

    async fn list_for_lead(&self, lead_id: &str) -> Result<Vec<ScheduledEntry>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "{} WHERE e.lead_id = ? ORDER BY e.date DESC, e.start_time DESC",
            SELECT_ENTRIES
        ))
            .bind(lead_id)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        let assignments = Self::load_assignments(&mut tx, &rows).await?;
        tx.commit().await.map_err(AppError::Database)?;

        Ok(ScheduledEntry::assemble(rows, assignments))
    }
}
