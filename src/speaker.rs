use std::ops::BitOr;

/// A single loudspeaker location.
///
/// Every position is one bit, so a set of positions packs into a
/// [SpeakerConfiguration] mask and composes with `|`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SpeakerPosition {
    FrontLeft = 1 << 0,
    FrontRight = 1 << 1,
    FrontCenter = 1 << 2,
    LowFrequency = 1 << 3,
    RearLeft = 1 << 4,
    RearRight = 1 << 5,
    FrontLeftOfCenter = 1 << 6,
    FrontRightOfCenter = 1 << 7,
    RearCenter = 1 << 8,
    SideLeft = 1 << 9,
    SideRight = 1 << 10,
    TopCenter = 1 << 11,
    FrontLeftHigh = 1 << 12,
    FrontCenterHigh = 1 << 13,
    FrontRightHigh = 1 << 14,
    RearLeftHigh = 1 << 15,
    RearCenterHigh = 1 << 16,
    RearRightHigh = 1 << 17,
}

impl SpeakerPosition {
    /// Every position, in ascending bit order. Index lookups walk this.
    pub const ALL: [SpeakerPosition; 18] = [
        SpeakerPosition::FrontLeft,
        SpeakerPosition::FrontRight,
        SpeakerPosition::FrontCenter,
        SpeakerPosition::LowFrequency,
        SpeakerPosition::RearLeft,
        SpeakerPosition::RearRight,
        SpeakerPosition::FrontLeftOfCenter,
        SpeakerPosition::FrontRightOfCenter,
        SpeakerPosition::RearCenter,
        SpeakerPosition::SideLeft,
        SpeakerPosition::SideRight,
        SpeakerPosition::TopCenter,
        SpeakerPosition::FrontLeftHigh,
        SpeakerPosition::FrontCenterHigh,
        SpeakerPosition::FrontRightHigh,
        SpeakerPosition::RearLeftHigh,
        SpeakerPosition::RearCenterHigh,
        SpeakerPosition::RearRightHigh,
    ];

    #[inline(always)]
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// Canonical short label used when naming channels.
    pub const fn suffix(self) -> &'static str {
        match self {
            SpeakerPosition::FrontLeft => "FL",
            SpeakerPosition::FrontRight => "FR",
            SpeakerPosition::FrontCenter => "FC",
            SpeakerPosition::LowFrequency => "LFE",
            SpeakerPosition::RearLeft => "RL",
            SpeakerPosition::RearRight => "RR",
            SpeakerPosition::FrontLeftOfCenter => "FLC",
            SpeakerPosition::FrontRightOfCenter => "FRC",
            SpeakerPosition::RearCenter => "RC",
            SpeakerPosition::SideLeft => "SL",
            SpeakerPosition::SideRight => "SR",
            SpeakerPosition::TopCenter => "TC",
            SpeakerPosition::FrontLeftHigh => "FLH",
            SpeakerPosition::FrontCenterHigh => "FCH",
            SpeakerPosition::FrontRightHigh => "FRH",
            SpeakerPosition::RearLeftHigh => "RLH",
            SpeakerPosition::RearCenterHigh => "RCH",
            SpeakerPosition::RearRightHigh => "RRH",
        }
    }
}

/// A set of speaker positions.
///
/// The population count of the mask is the channel count of any audio port
/// built from the configuration, and the set bits in ascending order give
/// each channel its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpeakerConfiguration(u32);

impl SpeakerConfiguration {
    pub const MONO: Self = Self(SpeakerPosition::FrontCenter as u32);
    pub const STEREO: Self =
        Self(SpeakerPosition::FrontLeft as u32 | SpeakerPosition::FrontRight as u32);
    pub const QUADRO: Self = Self(
        Self::STEREO.0 | SpeakerPosition::RearLeft as u32 | SpeakerPosition::RearRight as u32,
    );
    pub const SURROUND_5_1: Self = Self(
        Self::STEREO.0
            | SpeakerPosition::FrontCenter as u32
            | SpeakerPosition::LowFrequency as u32
            | SpeakerPosition::SideLeft as u32
            | SpeakerPosition::SideRight as u32,
    );
    pub const SURROUND_7_1: Self = Self(
        Self::SURROUND_5_1.0
            | SpeakerPosition::RearLeft as u32
            | SpeakerPosition::RearRight as u32,
    );

    const KNOWN: u32 = {
        let mut mask = 0;
        let mut i = 0;
        while i < SpeakerPosition::ALL.len() {
            mask |= SpeakerPosition::ALL[i] as u32;
            i += 1;
        }
        mask
    };

    /// Builds a configuration from a raw mask, keeping only bits that name
    /// a known position.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & Self::KNOWN)
    }

    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn contains(self, position: SpeakerPosition) -> bool {
        self.0 & position as u32 != 0
    }

    /// How many channels an audio port with this configuration carries.
    #[inline(always)]
    pub const fn channel_count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Set positions in ascending bit order.
    pub fn positions(self) -> impl Iterator<Item = SpeakerPosition> {
        SpeakerPosition::ALL
            .into_iter()
            .filter(move |position| self.contains(*position))
    }

    /// The position sitting at `index` when the set bits are enumerated in
    /// ascending bit order, or `None` once `index` runs past the last set
    /// bit.
    pub fn position_at_index(self, index: usize) -> Option<SpeakerPosition> {
        self.positions().nth(index)
    }

    /// Channel name suffix for the position at `index`.
    ///
    /// Single-channel configurations always give the empty suffix, so a
    /// mono channel is named after its port alone. Out-of-range indices
    /// give the empty suffix too.
    pub fn suffix_at_index(self, index: usize) -> &'static str {
        if self.channel_count() == 1 {
            return "";
        }
        match self.position_at_index(index) {
            Some(position) => position.suffix(),
            None => "",
        }
    }
}

impl BitOr for SpeakerPosition {
    type Output = SpeakerConfiguration;

    fn bitor(self, rhs: SpeakerPosition) -> SpeakerConfiguration {
        SpeakerConfiguration(self as u32 | rhs as u32)
    }
}

impl BitOr<SpeakerPosition> for SpeakerConfiguration {
    type Output = SpeakerConfiguration;

    fn bitor(self, rhs: SpeakerPosition) -> SpeakerConfiguration {
        SpeakerConfiguration(self.0 | rhs as u32)
    }
}

impl BitOr for SpeakerConfiguration {
    type Output = SpeakerConfiguration;

    fn bitor(self, rhs: SpeakerConfiguration) -> SpeakerConfiguration {
        SpeakerConfiguration(self.0 | rhs.0)
    }
}
