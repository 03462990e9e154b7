pub use anyhow::{ensure, Context as _, Result};
pub use itertools::{izip, Itertools as _};
pub use std::iter;
