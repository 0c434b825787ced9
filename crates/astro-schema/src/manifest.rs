//! Table manifest of the catalogue.
//!
//! Mirrors `astro-db/migrations/001_initial.sql`. Column lengths are the same
//! constants [`astro_core::validation::limits`] enforces before inserts.

use astro_core::validation::limits;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Datatype {
    String,
    Double,
    Boolean,
    Timestamp,
}

impl Datatype {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
        }
    }

    /// Declared type of the column in SQLite.
    #[must_use]
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::String | Self::Timestamp => "TEXT",
            Self::Double => "REAL",
            Self::Boolean => "INTEGER",
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub datatype: Datatype,
    pub length: Option<usize>,
    pub nullable: bool,
    pub primary_key: bool,
    pub ucd: Option<&'static str>,
    pub description: &'static str,
}

impl Column {
    const fn new(name: &'static str, datatype: Datatype, description: &'static str) -> Self {
        Self {
            name,
            datatype,
            length: None,
            nullable: true,
            primary_key: false,
            ucd: None,
            description,
        }
    }

    const fn string(name: &'static str, length: usize, description: &'static str) -> Self {
        let mut column = Self::new(name, Datatype::String, description);
        column.length = Some(length);
        column
    }

    const fn double(name: &'static str, description: &'static str) -> Self {
        Self::new(name, Datatype::Double, description)
    }

    const fn key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    const fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    const fn ucd(mut self, ucd: &'static str) -> Self {
        self.ucd = Some(ucd);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Index {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    ForeignKey,
    Check,
}

impl ConstraintKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForeignKey => "ForeignKey",
            Self::Check => "Check",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub description: &'static str,
    pub columns: &'static [&'static str],
    pub referenced_table: Option<&'static str>,
    pub referenced_columns: &'static [&'static str],
}

const fn foreign_key(
    columns: &'static [&'static str],
    table: &'static str,
    referenced: &'static [&'static str],
    description: &'static str,
) -> Constraint {
    Constraint {
        kind: ConstraintKind::ForeignKey,
        description,
        columns,
        referenced_table: Some(table),
        referenced_columns: referenced,
    }
}

const fn check(columns: &'static [&'static str], description: &'static str) -> Constraint {
    Constraint {
        kind: ConstraintKind::Check,
        description,
        columns,
        referenced_table: None,
        referenced_columns: &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: &'static [Column],
    pub indexes: &'static [Index],
    pub constraints: &'static [Constraint],
}

impl Table {
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn primary_key(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name)
            .collect()
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .iter()
            .filter(|c| c.kind == ConstraintKind::ForeignKey)
    }
}

/// Look a table up by name.
#[must_use]
pub fn table(name: &str) -> Option<&'static Table> {
    TABLES.iter().find(|t| t.name == name)
}

const REFERENCE_FK: Constraint = foreign_key(
    &["reference"],
    "publications",
    &["reference"],
    "Reference must exist in publications",
);

const SOURCE_FK: Constraint = foreign_key(
    &["source"],
    "sources",
    &["source"],
    "Source must exist in sources; rows are removed with the source",
);

const fn source_column() -> Column {
    Column::string("source", limits::SOURCE, "Canonical source name").key()
        .ucd("meta.id;meta.main")
}

const fn reference_key_column() -> Column {
    Column::string("reference", limits::REFERENCE, "Publication reference key").key()
        .ucd("meta.ref")
}

const fn comments_column() -> Column {
    Column::string("comments", limits::COMMENTS, "Free-text comments")
}

const fn adopted_column() -> Column {
    Column::new(
        "adopted",
        Datatype::Boolean,
        "Whether this measurement is the adopted one for the source",
    )
    .required()
}

/// Every table of the catalogue, parents before children.
pub const TABLES: &[Table] = &[
    Table {
        name: "publications",
        description: "Bibliographic references cited by every other table.",
        columns: &[
            Column::string("reference", limits::REFERENCE, "Short reference key, e.g. Smit21")
                .key()
                .ucd("meta.ref;meta.main"),
            Column::string("bibcode", limits::BIBCODE, "ADS bibcode").ucd("meta.bib.bibcode"),
            Column::string("doi", limits::DOI, "Digital object identifier").ucd("meta.ref.doi"),
            Column::string("description", limits::DESCRIPTION, "Title or summary of the work"),
        ],
        indexes: &[],
        constraints: &[check(&["reference"], "reference is 1 to 30 characters")],
    },
    Table {
        name: "versions",
        description: "Released versions of the database contents.",
        columns: &[
            Column::string("version", limits::VERSION, "Version label").key(),
            Column::string("start_date", limits::VERSION, "Date the version was started"),
            Column::string("end_date", limits::VERSION, "Date the version was released"),
            Column::string("description", limits::DESCRIPTION, "Summary of changes"),
        ],
        indexes: &[],
        constraints: &[],
    },
    Table {
        name: "telescopes",
        description: "Observing facilities.",
        columns: &[
            Column::string("telescope", limits::TELESCOPE, "Telescope name")
                .key()
                .ucd("instr.tel"),
            Column::string("description", limits::DESCRIPTION, "Description of the facility"),
            Column::string("reference", limits::REFERENCE, "Publication describing the facility")
                .ucd("meta.ref"),
        ],
        indexes: &[],
        constraints: &[REFERENCE_FK],
    },
    Table {
        name: "instruments",
        description: "Instrument modes, keyed by instrument, mode, and telescope.",
        columns: &[
            Column::string("instrument", limits::INSTRUMENT, "Instrument name")
                .key()
                .ucd("instr"),
            Column::string("mode", limits::MODE, "Observing mode, e.g. Imaging or Prism").key(),
            Column::string("telescope", limits::TELESCOPE, "Telescope carrying the instrument")
                .key()
                .ucd("instr.tel"),
            Column::string("description", limits::DESCRIPTION, "Description of the mode"),
            Column::string("reference", limits::REFERENCE, "Publication describing the instrument")
                .ucd("meta.ref"),
        ],
        indexes: &[],
        constraints: &[
            foreign_key(
                &["telescope"],
                "telescopes",
                &["telescope"],
                "Telescope must exist in telescopes",
            ),
            REFERENCE_FK,
        ],
    },
    Table {
        name: "regimes",
        description: "Wavelength regimes of spectra and photometry, as UCD labels.",
        columns: &[
            Column::string("regime", limits::REGIME, "Regime label").key(),
            Column::string("description", limits::DESCRIPTION, "Wavelength range covered"),
        ],
        indexes: &[],
        constraints: &[],
    },
    Table {
        name: "photometry_filters",
        description: "Photometric passbands, keyed by instrument.filter.",
        columns: &[
            Column::string("band", limits::BAND, "Band identifier, instrument.filter")
                .key()
                .ucd("instr.filter"),
            Column::string("ucd", limits::UCD, "UCD of the wavelength band").ucd("meta.ucd"),
            Column::double("effective_wavelength_angstroms", "Effective wavelength in angstroms")
                .required()
                .ucd("em.wl.effective"),
            Column::double("width_angstroms", "Effective width in angstroms").ucd("instr.bandwidth"),
        ],
        indexes: &[],
        constraints: &[
            check(&["band"], "band contains a '.' after a non-empty instrument name"),
            check(
                &["effective_wavelength_angstroms"],
                "effective wavelength is not negative",
            ),
        ],
    },
    Table {
        name: "parameter_list",
        description: "Vocabulary of modeled parameters.",
        columns: &[
            Column::string("parameter", limits::PARAMETER, "Parameter name").key(),
            Column::string("description", limits::DESCRIPTION, "Meaning of the parameter"),
        ],
        indexes: &[],
        constraints: &[],
    },
    Table {
        name: "sources",
        description: "Main identifiers of catalogued objects with their positions.",
        columns: &[
            source_column(),
            Column::double("ra_deg", "ICRS right ascension in degrees").ucd("pos.eq.ra;meta.main"),
            Column::double("dec_deg", "ICRS declination in degrees").ucd("pos.eq.dec;meta.main"),
            Column::double("epoch_year", "Epoch of the position as a decimal year")
                .ucd("time.epoch"),
            Column::string("equinox", limits::EQUINOX, "Equinox of the position, e.g. J2000")
                .ucd("time.equinox"),
            Column::string("shortname", limits::SHORTNAME, "Short name for plots"),
            Column::string("reference", limits::REFERENCE, "Discovery reference")
                .required()
                .ucd("meta.ref;meta.main"),
            Column::string(
                "other_references",
                limits::OTHER_REFERENCES,
                "Further references, comma separated",
            )
            .ucd("meta.ref"),
            comments_column(),
        ],
        indexes: &[Index {
            name: "idx_sources_dec",
            columns: &["dec_deg"],
            description: "Declination band prefilter for cone searches",
        }],
        constraints: &[
            check(&["ra_deg"], "ra_deg between 0 and 360"),
            check(&["dec_deg"], "dec_deg between -90 and 90"),
            REFERENCE_FK,
        ],
    },
    Table {
        name: "names",
        description: "Alternate names of sources. Every source has itself as a name.",
        columns: &[
            source_column(),
            Column::string("other_name", limits::OTHER_NAME, "Alternate name")
                .key()
                .ucd("meta.id"),
            Column::string("name_key", limits::OTHER_NAME, "Lowercase alphanumeric form for fuzzy matching")
                .required(),
        ],
        indexes: &[
            Index {
                name: "idx_names_other_name",
                columns: &["other_name"],
                description: "Exact name lookup",
            },
            Index {
                name: "idx_names_key",
                columns: &["name_key"],
                description: "Fuzzy name lookup",
            },
        ],
        constraints: &[SOURCE_FK],
    },
    Table {
        name: "photometry",
        description: "Magnitudes of sources per band and reference.",
        columns: &[
            source_column(),
            Column::string("band", limits::BAND, "Photometric band")
                .key()
                .ucd("instr.filter"),
            Column::double("magnitude", "Magnitude").required().ucd("phot.mag"),
            Column::double("magnitude_error", "Magnitude uncertainty").ucd("stat.error;phot.mag"),
            Column::string("telescope", limits::TELESCOPE, "Telescope used").ucd("instr.tel"),
            Column::double("epoch", "Epoch of observation as a decimal year").ucd("time.epoch"),
            comments_column(),
            reference_key_column(),
            Column::string("regime", limits::REGIME, "Wavelength regime"),
        ],
        indexes: &[],
        constraints: &[
            SOURCE_FK,
            foreign_key(
                &["band"],
                "photometry_filters",
                &["band"],
                "Band must exist in photometry_filters",
            ),
            foreign_key(
                &["telescope"],
                "telescopes",
                &["telescope"],
                "Telescope must exist in telescopes",
            ),
            REFERENCE_FK,
            foreign_key(&["regime"], "regimes", &["regime"], "Regime must exist in regimes"),
        ],
    },
    Table {
        name: "parallaxes",
        description: "Trigonometric parallaxes.",
        columns: &[
            source_column(),
            Column::double("parallax_mas", "Parallax in milliarcseconds")
                .required()
                .ucd("pos.parallax.trig"),
            Column::double("parallax_error", "Parallax uncertainty in milliarcseconds")
                .ucd("stat.error;pos.parallax.trig"),
            adopted_column(),
            comments_column(),
            reference_key_column(),
        ],
        indexes: &[],
        constraints: &[SOURCE_FK, REFERENCE_FK],
    },
    Table {
        name: "proper_motions",
        description: "Proper motions in milliarcseconds per year.",
        columns: &[
            source_column(),
            Column::double("pm_ra", "Proper motion in right ascension times cos(dec)")
                .required()
                .ucd("pos.pm;pos.eq.ra"),
            Column::double("pm_ra_error", "Uncertainty of pm_ra").ucd("stat.error;pos.pm;pos.eq.ra"),
            Column::double("pm_dec", "Proper motion in declination")
                .required()
                .ucd("pos.pm;pos.eq.dec"),
            Column::double("pm_dec_error", "Uncertainty of pm_dec")
                .ucd("stat.error;pos.pm;pos.eq.dec"),
            adopted_column(),
            comments_column(),
            reference_key_column(),
        ],
        indexes: &[],
        constraints: &[SOURCE_FK, REFERENCE_FK],
    },
    Table {
        name: "radial_velocities",
        description: "Radial velocities in km/s.",
        columns: &[
            source_column(),
            Column::double("rv_kms", "Radial velocity")
                .required()
                .ucd("spect.dopplerVeloc"),
            Column::double("rv_kms_error", "Radial velocity uncertainty")
                .ucd("stat.error;spect.dopplerVeloc"),
            adopted_column(),
            comments_column(),
            reference_key_column(),
        ],
        indexes: &[],
        constraints: &[
            check(&["rv_kms_error"], "rv_kms_error is not negative"),
            SOURCE_FK,
            REFERENCE_FK,
        ],
    },
    Table {
        name: "companion_relationships",
        description: "Physical associations between sources and their companions.",
        columns: &[
            source_column(),
            Column::string("companion_name", limits::SOURCE, "Name of the companion")
                .key()
                .ucd("meta.id"),
            Column::string("relationship", 30, "Child, Sibling, Parent, or Unresolved Parent")
                .required(),
            Column::double("projected_separation_arcsec", "Projected separation in arcseconds")
                .ucd("pos.angDistance"),
            Column::double("projected_separation_error", "Separation uncertainty in arcseconds")
                .ucd("stat.error;pos.angDistance"),
            comments_column(),
            Column::string("reference", limits::REFERENCE, "Publication reference key")
                .ucd("meta.ref"),
        ],
        indexes: &[],
        constraints: &[
            check(&["relationship"], "relationship is one of the four labels"),
            check(
                &["projected_separation_arcsec"],
                "projected separation is not negative",
            ),
            SOURCE_FK,
            REFERENCE_FK,
        ],
    },
    Table {
        name: "modeled_parameters",
        description: "Physical parameters derived from model fits.",
        columns: &[
            source_column(),
            Column::string("model", limits::MODEL, "Model grid or method"),
            Column::string("parameter", limits::PARAMETER, "Parameter name").key(),
            Column::double("value", "Parameter value").required(),
            Column::double("error", "Parameter uncertainty").ucd("stat.error"),
            Column::string("unit", limits::UNIT, "Unit of value and error").ucd("meta.unit"),
            comments_column(),
            reference_key_column(),
        ],
        indexes: &[],
        constraints: &[
            SOURCE_FK,
            foreign_key(
                &["parameter"],
                "parameter_list",
                &["parameter"],
                "Parameter must exist in parameter_list",
            ),
            REFERENCE_FK,
        ],
    },
    Table {
        name: "spectra",
        description: "Pointers to spectra of sources.",
        columns: &[
            source_column(),
            Column::string("access_url", limits::URL, "URL of the spectrum file")
                .required()
                .ucd("meta.ref.url"),
            Column::string("original_spectrum", limits::URL, "URL of the file as published")
                .ucd("meta.ref.url"),
            Column::string("local_spectrum", limits::URL, "Local path of the file"),
            Column::string("regime", limits::REGIME, "Wavelength regime").key(),
            Column::string("telescope", limits::TELESCOPE, "Telescope used").ucd("instr.tel"),
            Column::string("instrument", limits::INSTRUMENT, "Instrument used").ucd("instr"),
            Column::string("mode", limits::MODE, "Instrument mode"),
            Column::new(
                "observation_date",
                Datatype::Timestamp,
                "Date and time of the observation",
            )
            .key()
            .ucd("time.epoch"),
            comments_column(),
            reference_key_column(),
        ],
        indexes: &[],
        constraints: &[
            SOURCE_FK,
            foreign_key(&["regime"], "regimes", &["regime"], "Regime must exist in regimes"),
            foreign_key(
                &["instrument", "mode", "telescope"],
                "instruments",
                &["instrument", "mode", "telescope"],
                "Instrument mode must exist in instruments",
            ),
            REFERENCE_FK,
        ],
    },
];
