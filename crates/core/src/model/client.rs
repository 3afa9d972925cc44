/// Client application requesting a sign-in lookup.
///
/// Each client maps to the relation set the sign-in read hydrates; clients
/// without a dedicated mapping fall back to the minimal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Client {
    /// The milestone board application.
    Milestone,
    /// The documentation application.
    Docs,
}
