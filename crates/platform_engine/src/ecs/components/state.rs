//! State machine component
//!
//! Two parallel enumerations drive character behavior: [`State`] is the
//! discrete, input/AI-selected intent and [`SuperState`] is the continuous
//! physics phase. Every assignment of either records the previous value
//! and recomputes the derived [`AnimationId`], so the playing animation is
//! always consistent with the `(State, SuperState)` pair.

/// Possible interactive states an entity can be in, selected by input or AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Standing still
    Idle,
    /// Walking to the left
    WalkLeft,
    /// Walking to the right
    WalkRight,
    /// First jump requested
    Jump,
    /// Second jump requested while airborne
    DoubleJump,
    /// Pressed against a wall while airborne
    Slide,
}

/// Possible continuous physics phases an entity can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuperState {
    /// Resting on an obstacle
    IsOnGround,
    /// Airborne with downward velocity
    IsFalling,
    /// Rising from the first jump
    IsJumping,
    /// Rising from the second jump
    IsDoubleJumping,
    /// Dead; frozen until the death animation completes
    IsDead,
    /// Materializing; physics and collision are suspended
    IsAppearing,
}

/// Identifier of the animation clip derived from the state pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationId {
    /// Standing
    Idle,
    /// Walking either direction
    Walking,
    /// Airborne, descending
    Fall,
    /// Wall slide
    Slide,
    /// First jump ascent
    Jump,
    /// Second jump ascent
    DoubleJump,
    /// Death clip
    Death,
    /// Materialization clip
    Appear,
}

impl AnimationId {
    /// Stable name, used for sheet lookup and logging
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Fall => "fall",
            Self::Slide => "slide",
            Self::Jump => "jump",
            Self::DoubleJump => "double_jump",
            Self::Death => "death",
            Self::Appear => "appear",
        }
    }
}

/// Component that stores the current state pair of an entity, its derived
/// animation id, jump budget, facing direction and movement locks
#[derive(Debug, Clone)]
pub struct StateComponent {
    current_state: State,
    current_super_state: SuperState,
    previous_state: State,
    previous_super_state: SuperState,
    animation_id: AnimationId,

    /// Jumps spent since the last landing (0-2)
    pub jumps_performed: u8,

    /// Facing and walking direction, +1 right / -1 left
    pub horizontal_direction: i8,

    can_move_left: bool,
    can_move_right: bool,

    default_state: State,
    default_super_state: SuperState,
    default_horizontal_direction: i8,
}

impl StateComponent {
    /// Create a state component.
    ///
    /// The entity starts in `IsAppearing`; `default_super_state` is the
    /// phase resumed once the appear animation finishes.
    pub fn new(default_state: State, default_super_state: SuperState) -> Self {
        let mut component = Self {
            current_state: default_state,
            current_super_state: SuperState::IsAppearing,
            previous_state: default_state,
            previous_super_state: SuperState::IsAppearing,
            animation_id: AnimationId::Appear,
            jumps_performed: 0,
            horizontal_direction: 1,
            can_move_left: true,
            can_move_right: true,
            default_state,
            default_super_state,
            default_horizontal_direction: 1,
        };
        component.refresh_animation_id();
        component
    }

    /// Set the facing direction resumed after a respawn
    pub fn with_direction(mut self, direction: i8) -> Self {
        self.horizontal_direction = direction;
        self.default_horizontal_direction = direction;
        self
    }

    /// Current interactive state
    pub const fn state(&self) -> State {
        self.current_state
    }

    /// Current physics phase
    pub const fn super_state(&self) -> SuperState {
        self.current_super_state
    }

    /// Interactive state as of the previous assignment
    pub const fn previous_state(&self) -> State {
        self.previous_state
    }

    /// Physics phase as of the previous assignment
    pub const fn previous_super_state(&self) -> SuperState {
        self.previous_super_state
    }

    /// The animation derived from the current state pair
    pub const fn animation_id(&self) -> AnimationId {
        self.animation_id
    }

    /// State to resume when idle-like conditions re-arm (AI patrol)
    pub const fn default_state(&self) -> State {
        self.default_state
    }

    /// Phase to resume once the appear animation finishes
    pub const fn default_super_state(&self) -> SuperState {
        self.default_super_state
    }

    /// Facing direction restored on respawn
    pub const fn default_horizontal_direction(&self) -> i8 {
        self.default_horizontal_direction
    }

    /// Assign the interactive state, recording the previous one
    pub fn set_state(&mut self, state: State) {
        self.previous_state = self.current_state;
        self.current_state = state;
        self.refresh_animation_id();
    }

    /// Assign the physics phase, recording the previous one
    pub fn set_super_state(&mut self, super_state: SuperState) {
        self.previous_super_state = self.current_super_state;
        self.current_super_state = super_state;
        self.refresh_animation_id();
    }

    /// Whether collision left leftward movement unlocked this frame
    pub const fn can_move_left(&self) -> bool {
        self.can_move_left
    }

    /// Whether collision left rightward movement unlocked this frame
    pub const fn can_move_right(&self) -> bool {
        self.can_move_right
    }

    /// Lock or unlock leftward movement.
    ///
    /// Engaging the lock means the entity is pressed against a wall: it
    /// enters the wall slide and its jump budget is exhausted.
    pub fn set_can_move_left(&mut self, can_move: bool) {
        self.can_move_left = can_move;
        if !can_move {
            self.set_state(State::Slide);
            self.jumps_performed = 2;
        }
    }

    /// Lock or unlock rightward movement; same slide semantics as
    /// [`Self::set_can_move_left`]
    pub fn set_can_move_right(&mut self, can_move: bool) {
        self.can_move_right = can_move;
        if !can_move {
            self.set_state(State::Slide);
            self.jumps_performed = 2;
        }
    }

    // One fixed table maps the state pair to its animation; the id is
    // never independently settable.
    fn refresh_animation_id(&mut self) {
        self.animation_id = match self.current_super_state {
            SuperState::IsOnGround => match self.current_state {
                State::WalkLeft | State::WalkRight => AnimationId::Walking,
                _ => AnimationId::Idle,
            },
            SuperState::IsFalling => {
                if self.current_state == State::Slide {
                    AnimationId::Slide
                } else {
                    AnimationId::Fall
                }
            }
            SuperState::IsJumping => AnimationId::Jump,
            SuperState::IsDoubleJumping => AnimationId::DoubleJump,
            SuperState::IsDead => AnimationId::Death,
            SuperState::IsAppearing => AnimationId::Appear,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [State; 6] = [
        State::Idle,
        State::WalkLeft,
        State::WalkRight,
        State::Jump,
        State::DoubleJump,
        State::Slide,
    ];

    const ALL_SUPER_STATES: [SuperState; 6] = [
        SuperState::IsOnGround,
        SuperState::IsFalling,
        SuperState::IsJumping,
        SuperState::IsDoubleJumping,
        SuperState::IsDead,
        SuperState::IsAppearing,
    ];

    #[test]
    fn starts_appearing_with_appear_animation() {
        let state = StateComponent::new(State::Idle, SuperState::IsFalling);
        assert_eq!(state.super_state(), SuperState::IsAppearing);
        assert_eq!(state.default_super_state(), SuperState::IsFalling);
        assert_eq!(state.animation_id(), AnimationId::Appear);
    }

    #[test]
    fn assignments_record_previous_values() {
        let mut state = StateComponent::new(State::Idle, SuperState::IsFalling);
        state.set_super_state(SuperState::IsFalling);
        state.set_super_state(SuperState::IsOnGround);
        assert_eq!(state.previous_super_state(), SuperState::IsFalling);

        state.set_state(State::WalkRight);
        assert_eq!(state.previous_state(), State::Idle);
        assert_eq!(state.animation_id(), AnimationId::Walking);
    }

    #[test]
    fn animation_table_is_total() {
        // Every reachable pair maps to exactly one documented identifier.
        for super_state in ALL_SUPER_STATES {
            for state in ALL_STATES {
                let mut component = StateComponent::new(State::Idle, SuperState::IsFalling);
                component.set_super_state(super_state);
                component.set_state(state);

                let expected = match super_state {
                    SuperState::IsOnGround => match state {
                        State::WalkLeft | State::WalkRight => AnimationId::Walking,
                        _ => AnimationId::Idle,
                    },
                    SuperState::IsFalling => {
                        if state == State::Slide {
                            AnimationId::Slide
                        } else {
                            AnimationId::Fall
                        }
                    }
                    SuperState::IsJumping => AnimationId::Jump,
                    SuperState::IsDoubleJumping => AnimationId::DoubleJump,
                    SuperState::IsDead => AnimationId::Death,
                    SuperState::IsAppearing => AnimationId::Appear,
                };
                assert_eq!(component.animation_id(), expected);
            }
        }
    }

    #[test]
    fn engaging_a_lock_forces_slide_and_spends_jumps() {
        let mut state = StateComponent::new(State::Idle, SuperState::IsFalling);
        state.set_super_state(SuperState::IsFalling);

        state.set_can_move_right(false);

        assert!(!state.can_move_right());
        assert_eq!(state.state(), State::Slide);
        assert_eq!(state.jumps_performed, 2);
        assert_eq!(state.animation_id(), AnimationId::Slide);
    }

    #[test]
    fn releasing_a_lock_keeps_state() {
        let mut state = StateComponent::new(State::Idle, SuperState::IsFalling);
        state.set_can_move_left(false);
        let before = state.state();
        state.set_can_move_left(true);
        assert!(state.can_move_left());
        assert_eq!(state.state(), before);
    }
}
