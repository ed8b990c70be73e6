// used for persistence
use rusqlite::{Connection, Error, params};

use tracing::warn;

use crate::datatype::TweakValue;
use crate::error::Result;

/// Selects where overrides live.
#[derive(Debug, Clone)]
pub enum PersistenceMode {
    /// Overrides last only for the lifetime of the process.
    InMemory,
    /// Overrides are kept in an SQLite database at the given path and
    /// survive relaunches.
    File(String),
}

/// Encapsulates SQLite schema creation and durable storage of tweak
/// overrides. Keys are derived tweak identifiers, values are JSON blobs of
/// [`TweakValue`].
#[derive(Debug)]
pub struct Persistor {
    db: Connection,
}

impl Persistor {
    pub fn new(mode: &PersistenceMode) -> Result<Persistor> {
        let db = match mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        db.execute_batch(
            "
            create table if not exists Override (
                Identifier text not null,
                Value text not null,
                constraint referenceable_Override primary key (
                    Identifier
                )
            );
            ",
        )?;
        Ok(Persistor { db })
    }

    pub fn set(&mut self, identifier: &str, value: &TweakValue) -> Result<()> {
        let blob = serde_json::to_string(value)?;
        self.db
            .prepare_cached(
                "
                insert into Override (
                    Identifier,
                    Value
                ) values (?, ?)
                on conflict (Identifier) do update set Value = excluded.Value
                ",
            )?
            .execute(params![identifier, blob])?;
        Ok(())
    }

    pub fn get(&mut self, identifier: &str) -> Result<Option<TweakValue>> {
        let blob: std::result::Result<String, Error> = self
            .db
            .prepare_cached(
                "
                select Value
                    from Override
                    where Identifier = ?
                ",
            )?
            .query_row(params![identifier], |r| r.get(0));
        match blob {
            Ok(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            Err(Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn remove(&mut self, identifier: &str) -> Result<()> {
        self.db
            .prepare_cached(
                "
                delete from Override
                    where Identifier = ?
                ",
            )?
            .execute(params![identifier])?;
        Ok(())
    }

    pub fn remove_all(&mut self) -> Result<()> {
        self.db
            .prepare_cached(
                "
                delete from Override
                ",
            )?
            .execute([])?;
        Ok(())
    }

    // substr comparison instead of LIKE, since identifiers may contain the
    // wildcard characters '%' and '_'
    pub fn remove_all_with_prefix(&mut self, prefix: &str) -> Result<()> {
        self.db
            .prepare_cached(
                "
                delete from Override
                    where substr(Identifier, 1, ?) = ?
                ",
            )?
            .execute(params![prefix.chars().count() as i64, prefix])?;
        Ok(())
    }

    /// Read back every persisted override. Rows that no longer deserialize
    /// are skipped with a log line rather than failing the restore.
    pub fn restore_overrides(&mut self) -> Result<Vec<(String, TweakValue)>> {
        let mut stmt = self.db.prepare_cached(
            "
            select Identifier, Value
                from Override
            ",
        )?;
        let mut restored = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let identifier: String = row.get(0)?;
            let blob: String = row.get(1)?;
            match serde_json::from_str(&blob) {
                Ok(value) => restored.push((identifier, value)),
                Err(err) => {
                    warn!(identifier = %identifier, error = %err, "skipping unreadable override");
                }
            }
        }
        Ok(restored)
    }
}
