use crate::{
    common::*,
    unit::{PixelUnit, Unit},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HW<T> {
    h: T,
    w: T,
}

impl<T> HW<T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn try_from_hw(h: T, w: T) -> Result<Self> {
        let zero = T::zero();
        ensure!(
            h >= zero && w >= zero,
            "height and width parameters must be non-negative"
        );
        Ok(Self { h, w })
    }

    pub fn area(&self) -> T {
        self.h * self.w
    }

    pub fn h(&self) -> T {
        self.h
    }

    pub fn w(&self) -> T {
        self.w
    }
}

/// Generic size type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Size<T, U>
where
    U: Unit,
{
    inner: HW<T>,
    _phantom: PhantomData<U>,
}

pub type PixelSize<T> = Size<T, PixelUnit>;

impl<T, U> Size<T, U>
where
    U: Unit,
{
    pub fn try_from_hw(h: T, w: T) -> Result<Self>
    where
        T: Num + PartialOrd + Copy,
    {
        Ok(Self {
            inner: HW::try_from_hw(h, w)?,
            _phantom: PhantomData,
        })
    }

    pub fn from_hw(h: T, w: T) -> Self
    where
        T: Num + PartialOrd + Copy,
    {
        Self::try_from_hw(h, w).unwrap()
    }

    pub fn try_cast<V>(&self) -> Option<Size<V, U>>
    where
        T: Copy + ToPrimitive,
        V: NumCast,
    {
        Some(Size {
            inner: HW {
                h: V::from(self.inner.h)?,
                w: V::from(self.inner.w)?,
            },
            _phantom: PhantomData,
        })
    }

    pub fn cast<V>(&self) -> Size<V, U>
    where
        T: Copy + ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T, U> std::ops::Deref for Size<T, U>
where
    U: Unit,
{
    type Target = HW<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn size_area() {
        let size = PixelSize::from_hw(3.0, 2.0);
        let area: f64 = size.area();
        assert_abs_diff_eq!(area, 6.0);
    }

    #[test]
    fn rejects_negative_dimensions() {
        assert!(PixelSize::try_from_hw(-1.0, 10.0).is_err());
    }
}
