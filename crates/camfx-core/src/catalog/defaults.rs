//! Built-in catalog table.

pub const DEFAULT_OVERLAYS: &[&str] = &["my-camera-filters-assets:vader_helmet"];

pub const DEFAULT_FILTERS: &[&str] = &[
    "al_dente",
    "athena",
    "audrey",
    "aurora",
    "daguerre",
    "eucalyptus",
    "fes",
    "frost",
    "hairspray",
    "hokusai",
    "incognito",
    "linen",
    "peacock",
    "primavera",
    "quartz",
    "red_rock",
    "refresh",
    "sizzle",
    "sonnet",
    "ukulele",
    "zorro",
];
