//! Control Intents
//!
//! Named control actions derived from raw key state. Dynamics models and the
//! camera only ever see an [`IntentSet`], never key codes.

/// A discrete, named control action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Intent {
    Throttle,
    Brake,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
    SteerLeft,
    SteerRight,
    /// Righting impulse at the chassis nose
    NudgeForward,
    /// Righting impulse at the chassis tail
    NudgeBack,
    NudgeLeft,
    NudgeRight,
    FlyForward,
    FlyBack,
    FlyLeft,
    FlyRight,
    FlyUp,
    FlyDown,
    FlyFast,
    Reset,
    FreeCameraToggle,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 23] = [
        Intent::Throttle,
        Intent::Brake,
        Intent::PitchUp,
        Intent::PitchDown,
        Intent::YawLeft,
        Intent::YawRight,
        Intent::RollLeft,
        Intent::RollRight,
        Intent::SteerLeft,
        Intent::SteerRight,
        Intent::NudgeForward,
        Intent::NudgeBack,
        Intent::NudgeLeft,
        Intent::NudgeRight,
        Intent::FlyForward,
        Intent::FlyBack,
        Intent::FlyLeft,
        Intent::FlyRight,
        Intent::FlyUp,
        Intent::FlyDown,
        Intent::FlyFast,
        Intent::Reset,
        Intent::FreeCameraToggle,
    ];

    #[inline]
    const fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// Packed set of active intents for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntentSet(u32);

static_assertions::assert_eq_size!(IntentSet, u32);
static_assertions::const_assert!(Intent::ALL.len() <= 32);

impl IntentSet {
    /// No intents active.
    pub const EMPTY: IntentSet = IntentSet(0);

    const ROTATION: IntentSet = IntentSet(
        Intent::PitchUp.bit()
            | Intent::PitchDown.bit()
            | Intent::YawLeft.bit()
            | Intent::YawRight.bit()
            | Intent::RollLeft.bit()
            | Intent::RollRight.bit(),
    );

    const PITCH_ROLL: IntentSet = IntentSet(
        Intent::PitchUp.bit()
            | Intent::PitchDown.bit()
            | Intent::RollLeft.bit()
            | Intent::RollRight.bit(),
    );

    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Build a set from a list of intents.
    pub fn from_intents(intents: &[Intent]) -> Self {
        let mut set = Self::EMPTY;
        for &intent in intents {
            set.insert(intent);
        }
        set
    }

    #[inline]
    pub fn contains(self, intent: Intent) -> bool {
        self.0 & intent.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, intent: Intent) {
        self.0 |= intent.bit();
    }

    #[inline]
    pub fn remove(&mut self, intent: Intent) {
        self.0 &= !intent.bit();
    }

    /// Set or clear an intent.
    pub fn set(&mut self, intent: Intent, active: bool) {
        if active {
            self.insert(intent);
        } else {
            self.remove(intent);
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Intents active in `self` but not in `previous`.
    pub fn newly_active(self, previous: IntentSet) -> IntentSet {
        IntentSet(self.0 & !previous.0)
    }

    /// Any pitch, yaw or roll intent active.
    pub fn any_rotation(self) -> bool {
        self.0 & Self::ROTATION.0 != 0
    }

    /// Any pitch or roll intent active (yaw does not suspend auto-levelling).
    pub fn any_pitch_or_roll(self) -> bool {
        self.0 & Self::PITCH_ROLL.0 != 0
    }

    /// -1, 0 or +1 from a negative/positive intent pair.
    pub fn axis(self, negative: Intent, positive: Intent) -> f32 {
        (self.contains(positive) as i32 - self.contains(negative) as i32) as f32
    }

    /// Iterate the active intents in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Intent> {
        Intent::ALL.into_iter().filter(move |i| self.contains(*i))
    }
}

impl FromIterator<Intent> for IntentSet {
    fn from_iter<T: IntoIterator<Item = Intent>>(iter: T) -> Self {
        let mut set = IntentSet::EMPTY;
        for intent in iter {
            set.insert(intent);
        }
        set
    }
}
