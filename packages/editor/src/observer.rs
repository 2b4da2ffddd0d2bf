use broadsheet_schema::Document;

/// Receives the new document after every committed change.
///
/// Renderers and the autosaver hook in here, so the model never needs to
/// know who is watching.
pub trait DocumentObserver {
    fn document_changed(&mut self, document: &Document);
}

impl<F> DocumentObserver for F
where
    F: FnMut(&Document),
{
    fn document_changed(&mut self, document: &Document) {
        self(document)
    }
}
