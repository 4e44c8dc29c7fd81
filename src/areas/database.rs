use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Content-addressable object store
///
/// Each object lives at `objects/<first 2 hex>/<remaining 38 hex>` and holds
/// the raw bytes it was stored with. Objects are immutable: storing an ID that
/// already exists is a no-op.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Read the bytes stored under `object_id`.
    ///
    /// An unknown ID is not an error: it yields `None`, which callers render as
    /// "the file did not exist at that point".
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Option<Bytes>> {
        let object_path = self.path.join(object_id.to_path());

        match std::fs::read(&object_path) {
            Ok(content) => Ok(Some(content.into())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!(
                "Unable to read object file {}",
                object_path.display()
            )),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        Ok(self.load(object_id)?.map(Blob::new))
    }

    /// Persist `content` under `object_id`.
    pub fn store(&self, object_id: &ObjectId, content: &[u8]) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        // otherwise, create the object directory
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, content)?;
            log::debug!("stored object {object_id}");
        }

        Ok(())
    }

    fn write_object(&self, object_path: PathBuf, object_content: &[u8]) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn objects_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    fn database(dir: &TempDir) -> Database {
        Database::new(dir.path().join("objects").into_boxed_path())
    }

    #[rstest]
    fn stored_text_is_read_back_verbatim(objects_dir: TempDir) {
        let database = database(&objects_dir);
        let oid = ObjectId::digest(b"hello");

        database.store(&oid, b"hello").unwrap();

        assert_eq!(
            database.load(&oid).unwrap(),
            Some(Bytes::from_static(b"hello"))
        );
        assert!(objects_dir.path().join("objects").join(oid.to_path()).is_file());
    }

    #[rstest]
    fn unknown_object_is_absent(objects_dir: TempDir) {
        let database = database(&objects_dir);

        assert_eq!(database.load(&ObjectId::digest(b"missing")).unwrap(), None);
        assert_eq!(
            database
                .parse_object_as_blob(&ObjectId::digest(b"missing"))
                .unwrap(),
            None
        );
    }

    #[rstest]
    fn storing_twice_is_a_no_op(objects_dir: TempDir) {
        let database = database(&objects_dir);
        let oid = ObjectId::digest(b"same content");

        database.store(&oid, b"same content").unwrap();
        database.store(&oid, b"same content").unwrap();

        let prefix_dir = objects_dir
            .path()
            .join("objects")
            .join(&oid.as_ref()[..2]);
        assert_eq!(std::fs::read_dir(prefix_dir).unwrap().count(), 1);
    }

    proptest! {
        #[test]
        fn arbitrary_bytes_round_trip(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
            let dir = TempDir::new().unwrap();
            let database = database(&dir);
            let oid = ObjectId::digest(&data);

            database.store(&oid, &data).unwrap();
            let loaded = database.load(&oid).unwrap().unwrap();

            prop_assert_eq!(loaded.to_vec(), data);
        }
    }
}
