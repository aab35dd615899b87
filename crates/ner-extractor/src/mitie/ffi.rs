//! Raw bindings to the MITIE C API (`mitie.h`)

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_double, c_ulong, c_void};

#[repr(C)]
pub struct mitie_named_entity_extractor {
    _private: [u8; 0],
}

#[repr(C)]
pub struct mitie_named_entity_detections {
    _private: [u8; 0],
}

#[link(name = "mitie")]
extern "C" {
    pub fn mitie_free(object: *mut c_void);

    /// Returns a NULL-terminated array of tokens, or NULL on failure
    pub fn mitie_tokenize(text: *const c_char) -> *mut *mut c_char;

    pub fn mitie_load_named_entity_extractor(
        filename: *const c_char,
    ) -> *mut mitie_named_entity_extractor;

    pub fn mitie_get_num_possible_ner_tags(ner: *const mitie_named_entity_extractor) -> c_ulong;

    pub fn mitie_get_named_entity_tagstr(
        ner: *const mitie_named_entity_extractor,
        idx: c_ulong,
    ) -> *const c_char;

    pub fn mitie_extract_entities(
        ner: *const mitie_named_entity_extractor,
        tokens: *mut *mut c_char,
    ) -> *mut mitie_named_entity_detections;

    pub fn mitie_ner_get_num_detections(dets: *const mitie_named_entity_detections) -> c_ulong;

    pub fn mitie_ner_get_detection_position(
        dets: *const mitie_named_entity_detections,
        idx: c_ulong,
    ) -> c_ulong;

    pub fn mitie_ner_get_detection_length(
        dets: *const mitie_named_entity_detections,
        idx: c_ulong,
    ) -> c_ulong;

    pub fn mitie_ner_get_detection_tag(
        dets: *const mitie_named_entity_detections,
        idx: c_ulong,
    ) -> c_ulong;

    pub fn mitie_ner_get_detection_tagstr(
        dets: *const mitie_named_entity_detections,
        idx: c_ulong,
    ) -> *const c_char;

    pub fn mitie_ner_get_detection_score(
        dets: *const mitie_named_entity_detections,
        idx: c_ulong,
    ) -> c_double;
}
