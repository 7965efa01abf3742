//! Planner output in every recognised line format.

/// Classical `n: (action ...)` lines after a `Found Plan:` marker.
pub const FAST_DOWNWARD: &str = "\
Parsing domain and problem...
Translating task...
Found Plan:
0: (pick ball1 rooma left)
1: (move rooma roomb)
2: (drop ball1 roomb left)
Plan-Length: 3
Planning Time: 12 msec
Search time: 0.01 seconds
Expanded nodes: 7
0: (this line comes after the statistics and is ignored)
";

/// Bare `action args (cost)` lines.
pub const BARE_CLASSICAL: &str = "\
pick ball1 rooma left (1)
move rooma roomb (1)
drop ball1 roomb left (1)
";

/// Timestamped lines with no duration brackets; classical despite the times.
pub const CLASSICAL_TIMESTAMPED: &str = "\
0.0: (move r1 a b)
1.0: (move r1 b c)
2.0: (move r1 c d)
";

/// LPG-td output: upper-case actions, bracket durations, one zero duration.
pub const LPG: &str = "\
; Version: LPG-td-1.4
; Seed: 12345
; Command line: lpg-td -o domain.pddl -f problem.pddl -n 1
; Problem: problem.pddl
; Time 0.02
; Search time 0.01
; Parsing time 0.00
; MetricValue 3.00

0.0003: (PICK BALL1 ROOMA LEFT) [0.0000]
1.0005: (MOVE ROOMA ROOMB) [1.0000]
2.0008: (DROP BALL1 ROOMB LEFT) [1.0000]
";

/// `[start,end]: action args` interval lines.
pub const INTERVAL: &str = "\
Temporal plan (makespan 3.0):
[0.0,1.0]: move r1 rooma roomb
[1.0,1.5]: pick r1 ball1 roomb
[1.5,3.0]: move r1 roomb rooma
";

/// `at t: action args` lines.
pub const AT_FORM: &str = "\
Temporal plan, durative actions scheduled at:
at 0.0: move r1 rooma roomb
at 1.0: pick r1 ball1 roomb
at 2.0: move r1 roomb rooma
";

/// ENHSP output with inline numeric effects and a statistics block.
pub const ENHSP: &str = "\
Domain parsed
Problem parsed
Grounding..
Grounding Time: 45
|F|:12
|X|:3
|A|:20
Problem Solved

Found Plan:
0.0: (move r1 wp0 wp1) decrease (battery r1) 20
1.0: (recharge r1 wp1) increase (battery r1) 50
2.0: (move r1 wp1 wp2) decrease (battery r1) 30

Plan-Length:3
Metric (Search):3.0
Planning Time (msec): 120
Heuristic Time (msec): 30
Search Time (msec): 60
Expanded Nodes:14
States Evaluated:25
Number of Dead-Ends detected:0
Number of Duplicates detected:4
g(n)= 2.0 h(n)=1.0
g(n)= 3.0 h(n)=0.0
";

/// OPTIC output for the battery-delivery domain.
pub const OPTIC: &str = "\
; Command line: optic-clp -N domain.pddl problem.pddl
Number of literals: 9
;;;; Solution Found
; States evaluated: 20
; Cost: 12.003
; Time 0.05
0.000: (move r1 rooma roomb)  [5.000]
5.001: (recharge r1 roomb)  [2.000]
7.002: (move r1 roomb rooma)  [5.000]
";

/// Output of a PDDL+ planner for the boiler domain.
pub const PDDL_PLUS: &str = "\
; Plan for boiler (continuous processes active)
0.000: (start-heating b1)  [0.000]
10.000: (stop-heating b1)  [0.000]
";

/// Transcript without any action line.
pub const NO_ACTIONS: &str = "\
Parsing domain and problem...
Search stopped without finding a solution.
";

/// VAL-style temporal solution file.
pub const LEGACY_TEMPORAL_SOLUTION: &str = "\
; Cost: 12.003
; Time 0.02
0.000: (move r1 rooma roomb) [5.000]
5.001: (pick r1 ball1 roomb) [1.000]
6.002: (move r1 roomb rooma) [5.000]
";

/// Unit-cost classical solution file.
pub const LEGACY_CLASSICAL_SOLUTION: &str = "\
(pick ball1 rooma left)
(move rooma roomb)
(drop ball1 roomb left)
; cost = 3 (unit cost)
";
