pub mod cache {

    pub const SUGGESTION_TTL_HOURS: i64 = 24;
}

pub mod quota {

    pub const FREE_TIER_LIMIT: i32 = 10;

    pub const PRO_TIER_LIMIT: i32 = 100;

    /// Flat estimate used by the dashboard.
    pub const HOURS_SAVED_PER_ARTICLE: u64 = 2;
}

pub mod keywords {

    pub const MAX_PHRASE_CHARS: usize = 100;

    pub const DEFAULT_PAGE_SIZE: u64 = 20;

    pub const MAX_PAGE_SIZE: u64 = 100;

    pub const MAX_BULK_PHRASES: usize = 50;
}

pub mod suggestions {

    pub const MAX_SEEDS: usize = 5;

    pub const DEFAULT_LIMIT: u32 = 25;

    pub const MAX_LIMIT: u32 = 100;

    pub const DEFAULT_LANGUAGE: &str = "Korean";

    /// DataForSEO location code for South Korea.
    pub const DEFAULT_LOCATION_CODE: i32 = 2410;

    /// Body-level status code DataForSEO uses for a successful task.
    pub const PROVIDER_OK_STATUS: i64 = 20000;
}

pub mod articles {

    pub const DEFAULT_PAGE_SIZE: u64 = 10;

    pub const MAX_PAGE_SIZE: u64 = 100;

    pub const MAX_TITLE_CHARS: usize = 200;

    pub const MAX_SLUG_CHARS: usize = 200;

    pub const MAX_DESCRIPTION_CHARS: usize = 500;

    pub const MAX_META_TITLE_CHARS: usize = 60;

    pub const MAX_META_DESCRIPTION_CHARS: usize = 160;
}

pub mod style_guides {

    pub const MAX_BRAND_NAME_CHARS: usize = 100;

    pub const MAX_BRAND_DESCRIPTION_CHARS: usize = 1000;

    pub const MAX_PERSONALITY_TRAITS: usize = 5;

    pub const MAX_TARGET_AUDIENCE_CHARS: usize = 500;

    pub const MAX_PAIN_POINTS_CHARS: usize = 1000;

    pub const MAX_NOTES_CHARS: usize = 2000;
}

pub mod generation {

    pub const MAX_TOPIC_CHARS: usize = 200;

    pub const MAX_INSTRUCTIONS_CHARS: usize = 1000;

    pub const MAX_KEYWORDS: usize = 20;
}
