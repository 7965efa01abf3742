//! Domain texts, one per dialect.

/// Classical gripper (`:strips :typing`). Mixed case to exercise folding.
pub const GRIPPER: &str = r#"
; Classic gripper with one robot and two grippers
(define (domain GRIPPER-STRIPS)
  (:requirements :strips :typing)
  (:types room ball gripper)
  (:predicates (at-robby ?r - room)
               (at ?b - ball ?r - room)
               (free ?g - gripper)
               (carry ?o - ball ?g - gripper))
  (:action move
    :parameters (?from ?to - room)
    :precondition (at-robby ?from)
    :effect (and (at-robby ?to) (not (at-robby ?from))))
  (:action PICK
    :parameters (?obj - ball ?room - room ?g - gripper)
    :precondition (and (at ?obj ?room) (at-robby ?room) (free ?g))
    :effect (and (carry ?obj ?g) (not (at ?obj ?room)) (not (free ?g))))
  (:action drop
    :parameters (?obj - ball ?room - room ?g - gripper)
    :precondition (and (carry ?obj ?g) (at-robby ?room))
    :effect (and (at ?obj ?room) (free ?g) (not (carry ?obj ?g)))))
"#;

/// Durative delivery robot without numeric state.
pub const TEMPORAL_DELIVERY: &str = r#"
(define (domain rover-delivery)
  (:requirements :strips :typing :durative-actions)
  (:types robot room ball)
  (:predicates (at ?r - robot ?x - room)
               (ball-at ?b - ball ?x - room)
               (carrying ?r - robot ?b - ball)
               (free ?r - robot))
  (:durative-action move
    :parameters (?r - robot ?from ?to - room)
    :duration (= ?duration 5)
    :condition (at start (at ?r ?from))
    :effect (and (at start (not (at ?r ?from)))
                 (at end (at ?r ?to))))
  (:durative-action pick
    :parameters (?r - robot ?b - ball ?x - room)
    :duration (= ?duration 1)
    :condition (and (at start (ball-at ?b ?x))
                    (over all (at ?r ?x))
                    (at start (free ?r)))
    :effect (and (at start (not (ball-at ?b ?x)))
                 (at start (not (free ?r)))
                 (at end (carrying ?r ?b)))))
"#;

/// Durative delivery robot with a battery.
pub const METRIC_TEMPORAL_DELIVERY: &str = r#"
(define (domain battery-delivery)
  (:requirements :typing :durative-actions :numeric-fluents)
  (:types robot room ball)
  (:predicates (at ?r - robot ?x - room)
               (ball-at ?b - ball ?x - room)
               (carrying ?r - robot ?b - ball))
  (:functions (battery ?r - robot) - number)
  (:durative-action move
    :parameters (?r - robot ?from ?to - room)
    :duration (= ?duration 5)
    :condition (and (at start (at ?r ?from))
                    (at start (>= (battery ?r) 20)))
    :effect (and (at start (not (at ?r ?from)))
                 (at end (at ?r ?to))
                 (at end (decrease (battery ?r) 20))))
  (:durative-action recharge
    :parameters (?r - robot ?x - room)
    :duration (= ?duration 2)
    :condition (over all (at ?r ?x))
    :effect (at end (increase (battery ?r) 50))))
"#;

/// Instantaneous numeric rovers.
pub const NUMERIC_ROVERS: &str = r#"
(define (domain numeric-rovers)
  (:requirements :typing :numeric-fluents)
  (:types rover waypoint)
  (:predicates (at ?r - rover ?w - waypoint)
               (can-traverse ?from ?to - waypoint)
               (charger-at ?w - waypoint))
  (:functions (battery ?r - rover) - number
              (distance ?from ?to - waypoint) - number
              (total-cost) - number)
  (:action move
    :parameters (?r - rover ?from ?to - waypoint)
    :precondition (and (at ?r ?from)
                       (can-traverse ?from ?to)
                       (>= (battery ?r) (distance ?from ?to)))
    :effect (and (at ?r ?to)
                 (not (at ?r ?from))
                 (decrease (battery ?r) (distance ?from ?to))
                 (increase (total-cost) 1)))
  (:action recharge
    :parameters (?r - rover ?w - waypoint)
    :precondition (and (at ?r ?w) (charger-at ?w))
    :effect (increase (battery ?r) 50)))
"#;

/// PDDL+ boiler with a heating process and an overheat event.
pub const PDDL_PLUS_BOILER: &str = r#"
(define (domain boiler)
  (:requirements :typing :durative-actions :process)
  (:types boiler)
  (:predicates (heating ?b - boiler))
  (:functions (temperature ?b - boiler) - number)
  (:action start-heating
    :parameters (?b - boiler)
    :precondition (not (heating ?b))
    :effect (heating ?b))
  (:action stop-heating
    :parameters (?b - boiler)
    :precondition (heating ?b)
    :effect (not (heating ?b)))
  (:process heat
    :parameters (?b - boiler)
    :precondition (heating ?b)
    :effect (increase (temperature ?b) (* #t 2)))
  (:event overheat
    :parameters (?b - boiler)
    :precondition (>= (temperature ?b) 100)
    :effect (not (heating ?b))))
"#;
