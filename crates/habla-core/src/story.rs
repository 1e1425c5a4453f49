/// One page of an illustrated storybook: the narrative text plus the alt text
/// describing the (externally generated) illustration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryPage {
    pub text: String,
    pub illustration_alt: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Story {
    pub title: String,
    pub pages: Vec<StoryPage>,
}

/// Split story pages into print sheets of `per_sheet` pages each.
///
/// The last sheet may be short. A `per_sheet` of zero is clamped to 1 so a
/// misconfigured layout still produces output instead of looping.
pub fn paginate(pages: &[StoryPage], per_sheet: usize) -> Vec<Vec<StoryPage>> {
    let per_sheet = per_sheet.max(1);
    pages.chunks(per_sheet).map(|c| c.to_vec()).collect()
}
