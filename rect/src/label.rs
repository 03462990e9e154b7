/// A rectangle paired with its class id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label<R, C> {
    pub rect: R,
    pub class: C,
}
