//! Local filesystem storage backend for loose objects.
//! Each object lives at `objects/ab/cdef...` as a zlib stream of `"<type> <size>\0<payload>"`.
use std::{
    fs, io,
    io::{Read, Write},
    path::PathBuf,
};

use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};
use sha1::{Digest, Sha1};

use crate::{
    internal::{
        error::{GraphError, Result},
        object::{ObjectId, ObjectType},
    },
    utils::storage::Storage,
};

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// `base_path` is the `objects` directory. Nothing is created until an object is written.
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Gets the full path to an object file based on its hash. For example, "base_path/ab/cdef...".
    pub(crate) fn get_obj_path(&self, obj_id: &ObjectId) -> PathBuf {
        self.base_path.join(obj_id.fanout()).join(obj_id.file_name())
    }

    /// Reads the raw compressed data of a loose object. The file handle is closed before returning.
    fn read_raw_data(&self, obj_id: &ObjectId) -> Result<Vec<u8>> {
        let path = self.get_obj_path(obj_id);
        let mut file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GraphError::ObjectNotFound(obj_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    pub(crate) fn decompress_zlib(data: &[u8]) -> io::Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed_data = Vec::new();
        decoder.read_to_end(&mut decompressed_data)?;
        Ok(decompressed_data)
    }

    pub(crate) fn compress_zlib(data: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    /// Splits `"<type> <size>\0<payload>"` into the type and the payload offset.
    fn parse_header(obj_id: &ObjectId, data: &[u8]) -> Result<(ObjectType, usize)> {
        let corrupt = |reason: &str| GraphError::ObjectCorrupt {
            id: obj_id.to_string(),
            reason: reason.to_string(),
        };

        let end_of_header = data
            .iter()
            .position(|&b| b == b'\0')
            .ok_or_else(|| corrupt("no header terminator"))?;
        let header_str = std::str::from_utf8(&data[..end_of_header])
            .map_err(|_| corrupt("invalid UTF-8 in header"))?;

        let (type_str, size_str) = header_str
            .split_once(' ')
            .ok_or_else(|| corrupt("no object size in header"))?;
        let obj_type = ObjectType::from_string(type_str)
            .map_err(|e| corrupt(&format!("object type '{type_str}': {e}")))?;
        let size = size_str
            .parse::<usize>()
            .map_err(|_| corrupt(&format!("invalid size '{size_str}' in header")))?;
        let actual = data.len() - end_of_header - 1;
        if size != actual {
            return Err(corrupt(&format!(
                "header declares {size} bytes but payload has {actual}"
            )));
        }
        Ok((obj_type, end_of_header + 1))
    }

    fn hash_object(full_content: &[u8]) -> ObjectId {
        let digest = Sha1::digest(full_content);
        ObjectId::from_hex_unchecked(hex::encode(&digest[..]))
    }
}

impl Storage for LocalStorage {
    fn get(&self, id: &ObjectId) -> Result<(Vec<u8>, ObjectType)> {
        let mut data = self.get_inflated(id)?;
        let (obj_type, start) = Self::parse_header(id, &data)?;
        Ok((data.split_off(start), obj_type))
    }

    fn get_inflated(&self, id: &ObjectId) -> Result<Vec<u8>> {
        let raw_data = self.read_raw_data(id)?;
        Self::decompress_zlib(&raw_data).map_err(|e| GraphError::ObjectCorrupt {
            id: id.to_string(),
            reason: format!("zlib stream: {e}"),
        })
    }

    fn put(&self, data: &[u8], obj_type: ObjectType) -> Result<ObjectId> {
        let header = format!("{} {}\0", obj_type, data.len());
        let full_content = [header.as_bytes(), data].concat();
        let id = Self::hash_object(&full_content);

        let path = self.get_obj_path(&id);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut file = fs::File::create(&path)?;
        file.write_all(&Self::compress_zlib(&full_content)?)?;
        Ok(id)
    }

    fn exist(&self, id: &ObjectId) -> bool {
        self.get_obj_path(id).is_file()
    }
}
