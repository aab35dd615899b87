//! MITIE named entity extractor
//!
//! Safe wrapper over the native MITIE library. The model handle is loaded
//! once and shared; tokens and detections are owned per call and released
//! with `mitie_free`.

mod ffi;

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_ulong, c_void};
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use ner_core::{NerError, Result};

use crate::{EntityExtractor, RawDetection};

/// MITIE-backed entity extractor
pub struct MitieExtractor {
    handle: NonNull<ffi::mitie_named_entity_extractor>,
    tag_names: Vec<String>,
    model_path: PathBuf,
}

// The extractor object is only read after loading; MITIE allows concurrent
// calls to mitie_extract_entities on the same handle.
unsafe impl Send for MitieExtractor {}
unsafe impl Sync for MitieExtractor {}

impl MitieExtractor {
    /// Load a named entity model from disk
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self> {
        let model_path = model_path.as_ref().to_path_buf();
        let load_error = |reason: &str| NerError::ModelLoad {
            path: model_path.clone(),
            reason: reason.to_string(),
        };

        if !model_path.is_file() {
            return Err(load_error("model file not found"));
        }

        let c_path = CString::new(model_path.to_string_lossy().as_bytes())
            .map_err(|_| load_error("path contains a NUL byte"))?;

        // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
        let raw = unsafe { ffi::mitie_load_named_entity_extractor(c_path.as_ptr()) };
        let handle = NonNull::new(raw).ok_or_else(|| load_error("MITIE could not load model"))?;

        // SAFETY: handle is a live extractor; tag strings are owned by it.
        let tag_names = unsafe {
            let count = ffi::mitie_get_num_possible_ner_tags(handle.as_ptr());
            (0..count)
                .map(|idx| c_string(ffi::mitie_get_named_entity_tagstr(handle.as_ptr(), idx)))
                .collect::<Vec<_>>()
        };

        tracing::info!(
            model = %model_path.display(),
            tags = ?tag_names,
            "Loaded MITIE named entity extractor"
        );

        Ok(Self {
            handle,
            tag_names,
            model_path,
        })
    }

    /// Tag names the model was trained with, indexed by tag code
    pub fn tag_names(&self) -> &[String] {
        &self.tag_names
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Drop for MitieExtractor {
    fn drop(&mut self) {
        // SAFETY: handle came from mitie_load_named_entity_extractor and is freed once.
        unsafe { ffi::mitie_free(self.handle.as_ptr().cast::<c_void>()) };
    }
}

impl EntityExtractor for MitieExtractor {
    fn extract(&self, text: &str) -> Result<Vec<RawDetection>> {
        let tokens = Tokens::new(text)?;
        let words = tokens.to_strings();
        if words.is_empty() {
            return Ok(Vec::new());
        }

        // SAFETY: handle is live and tokens is a NULL-terminated array owned by MITIE.
        let raw = unsafe { ffi::mitie_extract_entities(self.handle.as_ptr(), tokens.as_ptr()) };
        let detections = Detections(
            NonNull::new(raw)
                .ok_or_else(|| NerError::Extraction("MITIE returned no detections".into()))?,
        );

        let mut result = Vec::with_capacity(detections.len());
        for idx in 0..detections.len() as c_ulong {
            let (position, length, code, tag_name, score) = detections.get(idx);
            let range = position..position.saturating_add(length);
            let covered = words.get(range).ok_or_else(|| {
                NerError::Extraction(format!(
                    "detection {idx} spans tokens {position}+{length} of {}",
                    words.len()
                ))
            })?;

            result.push(RawDetection {
                code,
                tag_name,
                score,
                tokens: covered.to_vec(),
            });
        }

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "mitie"
    }
}

/// Token array allocated by `mitie_tokenize`
struct Tokens(NonNull<*mut c_char>);

impl Tokens {
    fn new(text: &str) -> Result<Self> {
        let c_text = CString::new(text)
            .map_err(|_| NerError::InvalidInput("text contains a NUL byte".into()))?;

        // SAFETY: c_text is valid for the duration of the call.
        let raw = unsafe { ffi::mitie_tokenize(c_text.as_ptr()) };
        NonNull::new(raw)
            .map(Self)
            .ok_or_else(|| NerError::Extraction("MITIE tokenizer failed".into()))
    }

    fn as_ptr(&self) -> *mut *mut c_char {
        self.0.as_ptr()
    }

    fn to_strings(&self) -> Vec<String> {
        let mut words = Vec::new();
        let mut cursor = self.0.as_ptr();
        // SAFETY: the array is NULL-terminated and each entry is a C string.
        unsafe {
            while !(*cursor).is_null() {
                words.push(c_string(*cursor));
                cursor = cursor.add(1);
            }
        }
        words
    }
}

impl Drop for Tokens {
    fn drop(&mut self) {
        // SAFETY: allocated by mitie_tokenize; a single mitie_free releases the array and strings.
        unsafe { ffi::mitie_free(self.0.as_ptr().cast::<c_void>()) };
    }
}

/// Detections allocated by `mitie_extract_entities`
struct Detections(NonNull<ffi::mitie_named_entity_detections>);

impl Detections {
    fn len(&self) -> usize {
        // SAFETY: pointer is live until drop.
        unsafe { ffi::mitie_ner_get_num_detections(self.0.as_ptr()) as usize }
    }

    fn get(&self, idx: c_ulong) -> (usize, usize, u64, Option<String>, f64) {
        let dets = self.0.as_ptr();
        // SAFETY: idx < len(); the tag string is owned by the detections object.
        unsafe {
            let tag_str = ffi::mitie_ner_get_detection_tagstr(dets, idx);
            (
                ffi::mitie_ner_get_detection_position(dets, idx) as usize,
                ffi::mitie_ner_get_detection_length(dets, idx) as usize,
                ffi::mitie_ner_get_detection_tag(dets, idx) as u64,
                (!tag_str.is_null()).then(|| c_string(tag_str)),
                ffi::mitie_ner_get_detection_score(dets, idx),
            )
        }
    }
}

impl Drop for Detections {
    fn drop(&mut self) {
        // SAFETY: allocated by mitie_extract_entities and freed once.
        unsafe { ffi::mitie_free(self.0.as_ptr().cast::<c_void>()) };
    }
}

/// Copy a C string owned by MITIE
///
/// # Safety
/// `ptr` must be NULL or point to a NUL-terminated string.
unsafe fn c_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}
