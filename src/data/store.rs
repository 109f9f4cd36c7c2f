use anyhow::Result;

use super::loader::DataSource;
use super::model::Dataset;

/// Owns a [`DataSource`] and the snapshot every query reads.
///
/// Queries never mutate the snapshot; only [`DataStore::reload`] replaces it.
pub struct DataStore {
    source: Box<dyn DataSource>,
    dataset: Dataset,
}

impl DataStore {
    /// Load the first snapshot from `source`.
    pub fn open(source: Box<dyn DataSource>) -> Result<Self> {
        let dataset = source.load()?;
        log::info!(
            "Loaded {} institutions and {} metric rows from {}",
            dataset.institutions.len(),
            dataset.entries.len(),
            source.describe()
        );
        if dataset.entries.is_empty() {
            log::warn!("{} has no metric rows; every chart will be empty", source.describe());
        }
        Ok(DataStore { source, dataset })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Re-read the source. On failure the previous snapshot stays in place.
    pub fn reload(&mut self) -> Result<()> {
        match self.source.load() {
            Ok(dataset) => {
                log::info!(
                    "Reloaded {} metric rows from {}",
                    dataset.entries.len(),
                    self.source.describe()
                );
                self.dataset = dataset;
                Ok(())
            }
            Err(e) => {
                log::warn!("Reload from {} failed, keeping previous data: {e:#}", self.source.describe());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::data::fixtures;

    /// Serves the fixture once, then fails.
    struct FlakySource {
        calls: Rc<Cell<usize>>,
    }

    impl DataSource for FlakySource {
        fn load(&self) -> Result<Dataset> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() > 1 {
                anyhow::bail!("source went away");
            }
            fixtures::source().load()
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    #[test]
    fn failed_reload_keeps_snapshot() {
        let calls = Rc::new(Cell::new(0));
        let mut store = DataStore::open(Box::new(FlakySource {
            calls: Rc::clone(&calls),
        }))
        .unwrap();
        let before = store.dataset().entries.len();

        assert!(store.reload().is_err());
        assert_eq!(store.dataset().entries.len(), before);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn reload_rereads_source() {
        let mut store = DataStore::open(Box::new(fixtures::source())).unwrap();
        store.reload().unwrap();
        assert_eq!(store.describe(), "in-memory dataset");
        assert!(!store.dataset().institutions.is_empty());
    }
}
