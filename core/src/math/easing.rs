/// Outcome of one easing step toward a ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Approach {
    /// Regular proportional step; the ceiling is still more than one step away.
    Step(f64),
    /// The proportional step would reach the ceiling, so only half the
    /// remaining gap was covered.
    Settle(f64),
}

impl Approach {
    pub fn value(self) -> f64 {
        match self {
            Approach::Step(value) | Approach::Settle(value) => value,
        }
    }
}

pub struct EasingHelper;

impl EasingHelper {
    /// Exponential-decay step from `current` toward `target` that never lands
    /// on `target` itself.
    ///
    /// The step is `max(min_step, gap * decay)`. Once that would reach the
    /// target, the remaining gap is halved instead; when the halved step can no
    /// longer be represented below `target`, `current` is returned unchanged.
    pub fn approach(current: f64, target: f64, min_step: f64, decay: f64) -> Approach {
        let gap = target - current;
        if gap <= 0.0 {
            return Approach::Settle(current);
        }

        let step = min_step.max(gap * decay);
        if current + step < target {
            return Approach::Step(current + step);
        }

        let halved = current + gap / 2.0;
        if halved < target {
            Approach::Settle(halved)
        } else {
            Approach::Settle(current)
        }
    }
}
