//! Artwork URL resolution for the currently playing item.

use url::Url;

use crate::api::{ArtworkSource, ImageType};
use crate::session::NowPlayingItem;

/// Quality parameter sent with every artwork URL.
pub(crate) const ARTWORK_QUALITY: u32 = 100;

const BACKDROP_TAG: &str = "Backdrop";
const PRIMARY_TAG: &str = "Primary";

/// Resolve a display image URL for the playing item.
///
/// Fixed priority, first match wins: the item's own backdrop, then the
/// parent's backdrop by id, then the item's own primary image. Returns None
/// immediately when nothing is playing.
pub fn resolve_artwork_url<S>(item: Option<&NowPlayingItem>, source: &S) -> Option<Url>
where
    S: ArtworkSource + ?Sized,
{
    let item = item?;

    if item.has_image_tag(BACKDROP_TAG) {
        return Some(source.artwork(&item.id, ImageType::Backdrop, ARTWORK_QUALITY));
    }

    // The parent id is used without checking that the parent actually has a
    // backdrop; a stale id yields a dead URL rather than falling through to
    // the primary image.
    if let Some(parent_id) = &item.parent_backdrop_item_id {
        return Some(source.artwork(parent_id, ImageType::Backdrop, ARTWORK_QUALITY));
    }

    if item.has_image_tag(PRIMARY_TAG) {
        return Some(source.artwork(&item.id, ImageType::Primary, ARTWORK_QUALITY));
    }

    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    struct StaticArtwork;

    impl ArtworkSource for StaticArtwork {
        fn artwork(&self, item_id: &str, image_type: ImageType, quality: u32) -> Url {
            let raw = format!(
                "http://localhost:8096/Items/{item_id}/Images/{}?Quality={quality}",
                image_type.as_str()
            );
            Url::parse(&raw).unwrap()
        }
    }

    fn item() -> NowPlayingItem {
        NowPlayingItem {
            id: "ITEM-UUID".into(),
            name: "Pilot".into(),
            item_type: "Episode".into(),
            series_name: None,
            parent_index_number: None,
            index_number: None,
            run_time_ticks: None,
            image_tags: HashMap::new(),
            backdrop_image_tags: Vec::new(),
            parent_backdrop_item_id: None,
        }
    }

    #[test]
    fn no_item_means_no_artwork() {
        assert!(resolve_artwork_url(None, &StaticArtwork).is_none());
    }

    #[test]
    fn own_backdrop_beats_parent_backdrop() {
        let mut item = item();
        item.image_tags.insert("Backdrop".into(), "tag1".into());
        item.parent_backdrop_item_id = Some("PARENT-UUID".into());

        let url = resolve_artwork_url(Some(&item), &StaticArtwork).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8096/Items/ITEM-UUID/Images/Backdrop?Quality=100"
        );
    }

    #[test]
    fn parent_backdrop_is_used_without_validation() {
        let mut item = item();
        item.image_tags.insert("Primary".into(), "tag1".into());
        item.parent_backdrop_item_id = Some("PARENT-UUID".into());

        let url = resolve_artwork_url(Some(&item), &StaticArtwork).unwrap();

        // The parent wins over the item's own primary image, even though
        // nothing checked that the parent image exists.
        assert_eq!(
            url.as_str(),
            "http://localhost:8096/Items/PARENT-UUID/Images/Backdrop?Quality=100"
        );
    }

    #[test]
    fn primary_image_is_the_last_resort() {
        let mut item = item();
        item.image_tags.insert("Primary".into(), "tag1".into());

        let url = resolve_artwork_url(Some(&item), &StaticArtwork).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8096/Items/ITEM-UUID/Images/Primary?Quality=100"
        );
    }

    #[test]
    fn no_tags_and_no_parent_means_no_artwork() {
        assert!(resolve_artwork_url(Some(&item()), &StaticArtwork).is_none());
    }
}
