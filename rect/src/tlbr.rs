use crate::{
    clamp::clamp,
    common::*,
    size::PixelSize,
    unit::{PixelUnit, RatioUnit, Unit},
};

/// Bounding box in TLBR format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TLBR<T, U>
where
    U: Unit,
{
    t: T,
    l: T,
    b: T,
    r: T,
    _phantom: PhantomData<U>,
}

pub type PixelTLBR<T> = TLBR<T, PixelUnit>;
pub type RatioTLBR<T> = TLBR<T, RatioUnit>;

impl<T, U> TLBR<T, U>
where
    U: Unit,
{
    pub fn try_from_tlbr(tlbr: [T; 4]) -> Result<Self>
    where
        T: Num + PartialOrd,
    {
        let [t, l, b, r] = tlbr;
        ensure!(b >= t && r >= l, "b >= t and r >= l must hold");

        Ok(Self {
            t,
            l,
            b,
            r,
            _phantom: PhantomData,
        })
    }

    pub fn from_tlbr(tlbr: [T; 4]) -> Self
    where
        T: Num + PartialOrd,
    {
        Self::try_from_tlbr(tlbr).unwrap()
    }

    pub fn try_from_tlhw(tlhw: [T; 4]) -> Result<Self>
    where
        T: Num + PartialOrd + Copy,
    {
        let [t, l, h, w] = tlhw;
        let b = t + h;
        let r = l + w;
        Self::try_from_tlbr([t, l, b, r])
    }

    pub fn try_cast<V>(self) -> Option<TLBR<V, U>>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        Some(TLBR {
            t: V::from(self.t)?,
            l: V::from(self.l)?,
            b: V::from(self.b)?,
            r: V::from(self.r)?,
            _phantom: PhantomData,
        })
    }

    pub fn cast<V>(self) -> TLBR<V, U>
    where
        T: ToPrimitive,
        V: NumCast,
    {
        self.try_cast().unwrap()
    }
}

impl<T, U> TLBR<T, U>
where
    T: Copy + Num,
    U: Unit,
{
    pub fn t(&self) -> T {
        self.t
    }

    pub fn l(&self) -> T {
        self.l
    }

    pub fn b(&self) -> T {
        self.b
    }

    pub fn r(&self) -> T {
        self.r
    }

    pub fn h(&self) -> T {
        self.b - self.t
    }

    pub fn w(&self) -> T {
        self.r - self.l
    }

    pub fn tlbr(&self) -> [T; 4] {
        [self.t, self.l, self.b, self.r]
    }
}

impl<T> PixelTLBR<T>
where
    T: Float,
{
    /// Normalizes into fractions of the image size, clamped to `[0, 1]`.
    pub fn to_ratio_tlbr(&self, size: &PixelSize<T>) -> Result<RatioTLBR<T>> {
        let zero = T::zero();
        let one = T::one();
        ensure!(
            size.h() > zero && size.w() > zero,
            "image dimensions must be positive"
        );

        Ok(TLBR {
            t: clamp(self.t / size.h(), zero, one),
            l: clamp(self.l / size.w(), zero, one),
            b: clamp(self.b / size.h(), zero, one),
            r: clamp(self.r / size.w(), zero, one),
            _phantom: PhantomData,
        })
    }
}

impl<T> RatioTLBR<T>
where
    T: Float,
{
    /// Scales back to pixel coordinates, clamped to the image bounds.
    pub fn to_pixel_tlbr(&self, size: &PixelSize<T>) -> PixelTLBR<T> {
        let zero = T::zero();

        TLBR {
            t: clamp(self.t * size.h(), zero, size.h()),
            l: clamp(self.l * size.w(), zero, size.w()),
            b: clamp(self.b * size.h(), zero, size.h()),
            r: clamp(self.r * size.w(), zero, size.w()),
            _phantom: PhantomData,
        }
    }
}
