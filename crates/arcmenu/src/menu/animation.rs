use super::RADIUS_STEP;
use crate::geometry::Ring;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum AnimationState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Expand,
    Collapse,
}

/// Radius to paint after `radius`, or `None` once `radius` already sits on the bound.
///
/// The last step is clamped so the bound itself is painted exactly once.
pub fn step(radius: f64, direction: Direction, ring: Ring) -> Option<f64> {
    match direction {
        Direction::Expand => {
            let next = radius + RADIUS_STEP;
            if next <= ring.outer {
                Some(next)
            } else if radius < ring.outer {
                Some(ring.outer)
            } else {
                None
            }
        }
        Direction::Collapse => {
            let next = radius - RADIUS_STEP;
            if next >= ring.inner {
                Some(next)
            } else if radius > ring.inner {
                Some(ring.inner)
            } else {
                None
            }
        }
    }
}

/// Outcome of an open/close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new animation starts; the caller must request its first frame.
    Started,
    /// The in-flight animation turned around; its pending frame carries on.
    Reversed,
    /// Already heading that way.
    Ignored,
}

/// One painted frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub radius: f64,
    /// The terminal state, if this frame finished the animation.
    pub settled: Option<AnimationState>,
}

/// Frame-stepped open/close animation of the visible outer radius.
///
/// At most one animation is ever in flight: a frame is pending exactly while the state is
/// `Opening` or `Closing`, and opposite requests reverse it instead of starting another.
#[derive(Debug, Clone, Default)]
pub struct Animation {
    state: AnimationState,
    current_radius: f64,
    pending_radius: f64,
}

impl Animation {
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// The radius most recently painted.
    pub fn current_radius(&self) -> f64 {
        self.current_radius
    }

    /// Pulls the radii back inside a changed `ring`. Returns the radius to repaint at,
    /// or `None` while closed.
    ///
    /// An open menu snaps to the new outer radius; an animation keeps its direction.
    pub fn fit_to(&mut self, ring: Ring) -> Option<f64> {
        match self.state {
            AnimationState::Closed => None,
            AnimationState::Open => {
                self.current_radius = ring.outer;
                self.pending_radius = ring.outer;
                Some(ring.outer)
            }
            AnimationState::Opening | AnimationState::Closing => {
                self.current_radius = self.current_radius.clamp(ring.inner, ring.outer);
                self.pending_radius = self.pending_radius.clamp(ring.inner, ring.outer);
                Some(self.current_radius)
            }
        }
    }

    pub fn open(&mut self, ring: Ring) -> Transition {
        match self.state {
            AnimationState::Closed => {
                self.state = AnimationState::Opening;
                self.current_radius = ring.inner;
                self.pending_radius = ring.inner;
                Transition::Started
            }
            AnimationState::Closing => {
                self.state = AnimationState::Opening;
                self.pending_radius = self.current_radius;
                Transition::Reversed
            }
            AnimationState::Opening | AnimationState::Open => Transition::Ignored,
        }
    }

    pub fn close(&mut self, ring: Ring) -> Transition {
        match self.state {
            AnimationState::Open => {
                self.state = AnimationState::Closing;
                self.current_radius = ring.outer;
                self.pending_radius = ring.outer;
                Transition::Started
            }
            AnimationState::Opening => {
                self.state = AnimationState::Closing;
                self.pending_radius = self.current_radius;
                Transition::Reversed
            }
            AnimationState::Closing | AnimationState::Closed => Transition::Ignored,
        }
    }

    /// Consumes the pending frame: returns the radius to paint and advances past it.
    pub fn tick(&mut self, ring: Ring) -> Option<Tick> {
        let direction = match self.state {
            AnimationState::Opening => Direction::Expand,
            AnimationState::Closing => Direction::Collapse,
            AnimationState::Open | AnimationState::Closed => return None,
        };

        let radius = self.pending_radius;
        self.current_radius = radius;

        match step(radius, direction, ring) {
            Some(next) => {
                self.pending_radius = next;
                Some(Tick {
                    radius,
                    settled: None,
                })
            }
            None => {
                self.state = match direction {
                    Direction::Expand => AnimationState::Open,
                    Direction::Collapse => AnimationState::Closed,
                };
                Some(Tick {
                    radius,
                    settled: Some(self.state),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(animation: &mut Animation, ring: Ring) -> Vec<f64> {
        let mut painted = Vec::new();
        while let Some(tick) = animation.tick(ring) {
            painted.push(tick.radius);
            assert!(painted.len() < 1000, "animation never settled");
        }
        painted
    }

    #[test]
    fn test_step_clamps_to_the_bound() {
        let ring = Ring::new(25.0, 80.0);
        assert_eq!(step(65.0, Direction::Expand, ring), Some(75.0));
        assert_eq!(step(75.0, Direction::Expand, ring), Some(80.0));
        assert_eq!(step(70.0, Direction::Expand, ring), Some(80.0));
        assert_eq!(step(80.0, Direction::Expand, ring), None);

        assert_eq!(step(30.0, Direction::Collapse, ring), Some(25.0));
        assert_eq!(step(35.0, Direction::Collapse, ring), Some(25.0));
        assert_eq!(step(25.0, Direction::Collapse, ring), None);
    }

    #[test]
    fn test_open_runs_inner_to_outer() {
        let ring = Ring::new(25.0, 80.0);
        let mut animation = Animation::default();

        assert_eq!(animation.open(ring), Transition::Started);
        assert_eq!(animation.state(), AnimationState::Opening);

        let painted = run(&mut animation, ring);
        assert_eq!(painted, vec![25.0, 35.0, 45.0, 55.0, 65.0, 75.0, 80.0]);
        assert_eq!(animation.state(), AnimationState::Open);
        assert_eq!(animation.current_radius(), 80.0);
    }

    #[test]
    fn test_close_runs_outer_to_inner() {
        let ring = Ring::new(20.0, 80.0);
        let mut animation = Animation::default();
        animation.open(ring);
        run(&mut animation, ring);

        assert_eq!(animation.close(ring), Transition::Started);
        let painted = run(&mut animation, ring);
        assert_eq!(painted, vec![80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0]);
        assert_eq!(animation.state(), AnimationState::Closed);
    }

    #[test]
    fn test_final_tick_reports_terminal_state() {
        let ring = Ring::new(40.0, 40.0);
        let mut animation = Animation::default();
        animation.open(ring);
        let tick = animation.tick(ring).unwrap();
        assert_eq!(tick.radius, 40.0);
        assert_eq!(tick.settled, Some(AnimationState::Open));
        assert_eq!(animation.tick(ring), None);
    }

    #[test]
    fn test_repeated_requests_are_ignored() {
        let ring = Ring::new(20.0, 80.0);
        let mut animation = Animation::default();
        assert_eq!(animation.close(ring), Transition::Ignored);
        animation.open(ring);
        assert_eq!(animation.open(ring), Transition::Ignored);
        run(&mut animation, ring);
        assert_eq!(animation.open(ring), Transition::Ignored);
        animation.close(ring);
        assert_eq!(animation.close(ring), Transition::Ignored);
    }

    #[test]
    fn test_close_while_opening_reverses_from_painted_radius() {
        let ring = Ring::new(20.0, 80.0);
        let mut animation = Animation::default();
        animation.open(ring);
        animation.tick(ring);
        animation.tick(ring);
        animation.tick(ring);
        assert_eq!(animation.current_radius(), 40.0);

        assert_eq!(animation.close(ring), Transition::Reversed);
        let painted = run(&mut animation, ring);
        assert_eq!(painted, vec![40.0, 30.0, 20.0]);
        assert_eq!(animation.state(), AnimationState::Closed);
    }

    #[test]
    fn test_fit_to_follows_a_changed_ring() {
        let ring = Ring::new(20.0, 80.0);
        let mut animation = Animation::default();
        assert_eq!(animation.fit_to(ring), None);

        animation.open(ring);
        run(&mut animation, ring);
        let wider = Ring::new(20.0, 120.0);
        assert_eq!(animation.fit_to(wider), Some(120.0));
        assert_eq!(animation.current_radius(), 120.0);
        assert_eq!(animation.state(), AnimationState::Open);

        animation.close(wider);
        animation.tick(wider);
        animation.tick(wider);
        let narrow = Ring::new(30.0, 60.0);
        assert_eq!(animation.fit_to(narrow), Some(60.0));
        let painted = run(&mut animation, narrow);
        assert_eq!(painted, vec![60.0, 50.0, 40.0, 30.0]);
        assert_eq!(animation.state(), AnimationState::Closed);
    }

    #[test]
    fn test_open_while_closing_reverses() {
        let ring = Ring::new(20.0, 80.0);
        let mut animation = Animation::default();
        animation.open(ring);
        run(&mut animation, ring);
        animation.close(ring);
        animation.tick(ring);
        animation.tick(ring);

        assert_eq!(animation.open(ring), Transition::Reversed);
        let painted = run(&mut animation, ring);
        assert_eq!(painted, vec![70.0, 80.0]);
        assert_eq!(animation.state(), AnimationState::Open);
    }
}
