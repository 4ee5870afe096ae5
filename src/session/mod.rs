use crate::caption::CaptionRecord;
use crate::form::CaptionForm;

/// Form state plus every caption generated since startup, oldest first.
#[derive(Debug, Default)]
pub struct Session {
    pub form: CaptionForm,
    captions: Vec<CaptionRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captions(&self) -> &[CaptionRecord] {
        &self.captions
    }

    pub(crate) fn push(&mut self, record: CaptionRecord) -> &CaptionRecord {
        self.captions.push(record);
        &self.captions[self.captions.len() - 1]
    }
}
