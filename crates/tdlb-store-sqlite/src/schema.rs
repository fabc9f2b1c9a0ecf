//! SQL schema for the TDLB SQLite store.
//!
//! Executed once at connection startup. `AUTOINCREMENT` keeps per-table row
//! numbering in `sqlite_sequence`, which is what the full-wipe maintenance
//! reset clears.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS` and
/// `INSERT OR IGNORE` for the seeded annotation-type catalog.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS target (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    description TEXT NOT NULL,
    uniprot     TEXT NOT NULL,   -- primary accession
    up_version  INTEGER,
    geneid      INTEGER,
    sym         TEXT,
    family      TEXT,
    chr         TEXT,
    seq         TEXT,
    stringid    TEXT,
    tdl         TEXT             -- computed downstream; nullable
);

CREATE TABLE IF NOT EXISTS alias (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id INTEGER NOT NULL REFERENCES target(id),
    atype     TEXT NOT NULL,    -- 'symbol' | 'uniprot' | ...
    value     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS xref (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id INTEGER NOT NULL REFERENCES target(id),
    xtype     TEXT NOT NULL,
    value     TEXT NOT NULL,
    xtra      TEXT
);

-- Duplicate (type, target, value) inserts are tolerated as no-ops.
CREATE UNIQUE INDEX IF NOT EXISTS xref_idx3 ON xref(xtype, target_id, value);

-- The annotation-type catalog the annotation registry is built from.
CREATE TABLE IF NOT EXISTS info_type (
    name      TEXT PRIMARY KEY,
    data_type TEXT NOT NULL
      CHECK (data_type IN ('String', 'Integer', 'Number', 'Boolean', 'Date'))
);

INSERT OR IGNORE INTO info_type (name, data_type) VALUES
    ('UniProt Function', 'String'),
    ('NCBI Gene Summary', 'String'),
    ('Experimental MF/BP Leaf Term GOA', 'String'),
    ('TMHMM Prediction', 'String'),
    ('Drugable Epigenome Class', 'String'),
    ('Ab Count', 'Integer'),
    ('MAb Count', 'Integer'),
    ('EBI Total Patent Count', 'Integer'),
    ('UniProt annotation score', 'Integer'),
    ('JensenLab PubMed Score', 'Number'),
    ('PubTator Score', 'Number'),
    ('Is Transcription Factor', 'Boolean'),
    ('UniProt Entry Date', 'Date');

-- One typed value per row, in the column named by the type's declared kind.
CREATE TABLE IF NOT EXISTS tdl_info (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id     INTEGER NOT NULL REFERENCES target(id),
    itype         TEXT NOT NULL REFERENCES info_type(name),
    string_value  TEXT,
    integer_value INTEGER,
    number_value  REAL,
    boolean_value INTEGER,
    date_value    TEXT
);

CREATE TABLE IF NOT EXISTS goa (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id   INTEGER NOT NULL REFERENCES target(id),
    go_id       TEXT NOT NULL,
    go_term     TEXT,
    evidence    TEXT,
    goeco       TEXT,
    assigned_by TEXT
);

CREATE TABLE IF NOT EXISTS generif (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id  INTEGER NOT NULL REFERENCES target(id),
    text       TEXT NOT NULL,
    pubmed_ids TEXT,            -- JSON array
    years      TEXT             -- JSON array
);

CREATE TABLE IF NOT EXISTS pmscore (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id INTEGER NOT NULL REFERENCES target(id),
    year      INTEGER NOT NULL,
    score     REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS drug_activity (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id        INTEGER NOT NULL REFERENCES target(id),
    drug             TEXT NOT NULL,
    dcid             INTEGER NOT NULL,
    has_moa          INTEGER NOT NULL,
    act_value        REAL,
    act_type         TEXT,
    action_type      TEXT,
    source           TEXT,
    reference        TEXT,
    smiles           TEXT,
    cmpd_chemblid    TEXT,
    cmpd_pubchem_cid INTEGER,
    nlm_drug_info    TEXT
);

CREATE TABLE IF NOT EXISTS cmpd_activity (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    target_id        INTEGER NOT NULL REFERENCES target(id),
    catype           TEXT NOT NULL,
    cmpd_id_in_src   TEXT NOT NULL,
    cmpd_name_in_src TEXT,
    smiles           TEXT,
    act_value        REAL,
    act_type         TEXT,
    reference        TEXT,
    pubmed_ids       TEXT,      -- JSON array
    cmpd_pubchem_cid INTEGER
);

CREATE INDEX IF NOT EXISTS target_sym_idx      ON target(sym);
CREATE INDEX IF NOT EXISTS target_uniprot_idx  ON target(uniprot);
CREATE INDEX IF NOT EXISTS target_name_idx     ON target(name);
CREATE INDEX IF NOT EXISTS target_geneid_idx   ON target(geneid);
CREATE INDEX IF NOT EXISTS target_stringid_idx ON target(stringid);

CREATE INDEX IF NOT EXISTS alias_target_idx    ON alias(target_id);
CREATE INDEX IF NOT EXISTS alias_value_idx     ON alias(atype, value);
CREATE INDEX IF NOT EXISTS tdl_info_target_idx ON tdl_info(target_id);
CREATE INDEX IF NOT EXISTS tdl_info_itype_idx  ON tdl_info(itype);
CREATE INDEX IF NOT EXISTS goa_target_idx      ON goa(target_id);
CREATE INDEX IF NOT EXISTS generif_target_idx  ON generif(target_id);
CREATE INDEX IF NOT EXISTS pmscore_target_idx  ON pmscore(target_id);
CREATE INDEX IF NOT EXISTS drug_activity_target_idx ON drug_activity(target_id);
CREATE INDEX IF NOT EXISTS cmpd_activity_target_idx ON cmpd_activity(target_id);

PRAGMA user_version = 1;
";
