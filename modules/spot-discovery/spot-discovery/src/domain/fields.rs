pub struct ReviewFields;

impl ReviewFields {
    pub const SPOT_ID: &'static str = "spot_id";
    pub const REVIEW_ID: &'static str = "review_id";
    pub const TEXT: &'static str = "text";
}

pub struct FavoriteFields;

impl FavoriteFields {
    pub const ID: &'static str = "id";
}
