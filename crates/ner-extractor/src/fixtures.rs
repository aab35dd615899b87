//! Spanish sample sentences shared by tests across the workspace

/// Sample texts grouped by the entities they contain
#[derive(Debug, Clone, Copy)]
pub struct SpanishTestTexts {
    pub person_location: &'static str,
    pub organization: &'static str,
    pub mixed: &'static str,
    pub complex: &'static str,
    pub no_entities: &'static str,
    pub empty: &'static str,
}

pub const SPANISH_TEST_TEXTS: SpanishTestTexts = SpanishTestTexts {
    person_location: "María García vive en Madrid",
    organization: "Trabajo en Microsoft España",
    mixed: "Pedro Sánchez visitó Barcelona para reunirse con representantes de Telefónica",
    complex: "El presidente del Real Madrid, Florentino Pérez, se reunió con Karim Benzema en el Santiago Bernabéu",
    no_entities: "El día está muy soleado y hace calor",
    empty: "",
};

/// Tag strings a client can receive
pub const EXPECTED_ENTITY_TYPES: [&str; 4] = ["PERSON", "LOCATION", "ORGANIZATION", "MISC"];
