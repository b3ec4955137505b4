use crate::{Analyzer, DocMeta, Field, FieldIndex, InvertedIndex};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, remove_file, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub analyzer: Analyzer,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn fields(&self) -> PathBuf { self.root.join("fields.bin") }
    fn docs(&self) -> PathBuf { self.root.join("docs.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

/// Write `index` under `paths.root`, replacing any index already there.
pub fn save_index(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    create_dir_all(&paths.root).with_context(|| format!("creating index dir {:?}", paths.root))?;
    // meta.json goes last; drop the stale one first so a half-written index never looks complete
    if paths.meta().exists() {
        remove_file(paths.meta())?;
    }
    write_bincode(&paths.fields(), &index.fields)?;
    write_bincode(&paths.docs(), &index.docs)?;
    let meta = MetaFile {
        num_docs: index.doc_count(),
        analyzer: index.analyzer(),
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        version: FORMAT_VERSION,
    };
    save_meta(paths, &meta)
}

pub fn load_index(paths: &IndexPaths) -> Result<InvertedIndex> {
    let meta = load_meta(paths)?;
    if meta.version != FORMAT_VERSION {
        anyhow::bail!("unsupported index version {} in {:?}", meta.version, paths.meta());
    }
    let fields: BTreeMap<Field, FieldIndex> = read_bincode(&paths.fields())?;
    let docs: Vec<DocMeta> = read_bincode(&paths.docs())?;
    if docs.len() as u32 != meta.num_docs {
        anyhow::bail!("{:?} lists {} docs but meta.json says {}", paths.docs(), docs.len(), meta.num_docs);
    }
    Ok(InvertedIndex::from_parts(meta.analyzer, fields, docs))
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta()).with_context(|| format!("opening {:?}", paths.meta()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let f = File::create(path).with_context(|| format!("creating {path:?}"))?;
    let mut w = BufWriter::new(f);
    bincode::serialize_into(&mut w, value)?;
    w.flush()?;
    Ok(())
}

fn read_bincode<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let f = File::open(path).with_context(|| format!("opening {path:?}"))?;
    let value = bincode::deserialize_from(BufReader::new(f))?;
    Ok(value)
}
