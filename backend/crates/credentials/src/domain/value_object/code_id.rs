use kernel::id::Id;

pub struct CodeMarker;
pub type CodeId = Id<CodeMarker>;
