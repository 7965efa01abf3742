//! Problem texts matching [`crate::domains`].

/// Two balls in `rooma`, to be carried to `roomb`.
pub const GRIPPER: &str = r#"
(define (problem gripper-two-balls)
  (:domain gripper-strips)
  (:objects rooma roomb - room
            ball1 ball2 - ball
            left right - gripper)
  (:init (at-robby rooma)
         (free left) (free right)
         (at ball1 rooma) (at ball2 rooma))
  (:goal (and (at ball1 roomb) (at ball2 roomb))))
"#;

/// One rover crossing three waypoints with a recharge on the way.
pub const NUMERIC_ROVERS: &str = r#"
(define (problem rovers-1)
  (:domain numeric-rovers)
  (:objects r1 - rover
            wp0 wp1 wp2 - waypoint)
  (:init (at r1 wp0)
         (can-traverse wp0 wp1)
         (can-traverse wp1 wp2)
         (charger-at wp1)
         (= (battery r1) 60)
         (= (distance wp0 wp1) 20)
         (= (distance wp1 wp2) 30)
         (= (total-cost) 0))
  (:goal (at r1 wp2))
  (:metric minimize (total-cost)))
"#;

/// Delivery problem for the durative domains.
pub const DELIVERY: &str = r#"
(define (problem deliver-one)
  (:domain battery-delivery)
  (:objects r1 - robot rooma roomb - room ball1 - ball)
  (:init (at r1 rooma) (ball-at ball1 roomb) (= (battery r1) 100))
  (:goal (carrying r1 ball1)))
"#;
