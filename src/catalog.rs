//! Built-in rewrites for `CBTExercises.tsx`.
//!
//! `Exercise` is a union discriminated on `type`:
//! `'guided' | 'journal' | 'adhd_game' | 'breathing'`. The generated component
//! reads variant-only fields (`prompts`, `gameType`, `instructions`) straight
//! off the union. Each rule wraps such an access in a discriminant check and
//! an explicit cast to the variant interface.
//!
//! Rules run in declaration order, each over the output of the previous one.

use crate::rule::RewriteRule;

/// Default target, relative to the working directory.
pub const DEFAULT_TARGET: &str = "src/components/CBTExercises.tsx";

/// Printed once the rewritten file has been written.
pub const CONFIRMATION: &str = "Fixed remaining TypeScript errors in CBTExercises.tsx";

pub const JOURNAL_PROMPT_COUNT: RewriteRule = RewriteRule {
    id: "journal-prompt-count",
    description: "guard prompts?.length behind type === 'journal', fall back to 0",
    pattern: r"getExerciseById\(activeExercise\)\s*\?\.exercise\.prompts\?\.length",
    replacement: "(getExerciseById(activeExercise)?.exercise.type === 'journal' ? (getExerciseById(activeExercise)?.exercise as JournalingExercise).prompts.length : 0)",
};

pub const JOURNAL_PROMPT_STEP: RewriteRule = RewriteRule {
    id: "journal-prompt-step",
    description: "guard {prompts?[currentStep]} behind type === 'journal', fall back to ''",
    pattern: r"\{\s*getExerciseById\(activeExercise\)\s*\?\.exercise\.prompts\?\[currentStep\]\s*\}",
    replacement: "{getExerciseById(activeExercise)?.exercise.type === 'journal' ? (getExerciseById(activeExercise)?.exercise as JournalingExercise).prompts[currentStep] : ''}",
};

pub const GAME_TYPE_COLOR_FOCUS: RewriteRule = RewriteRule {
    id: "game-type-color-focus",
    description: "require type === 'adhd_game' before comparing gameType to 'color_focus'",
    pattern: r#"getExerciseById\(activeExercise\)\?\.exercise\s*\.gameType === "color_focus""#,
    replacement: "getExerciseById(activeExercise)?.exercise.type === 'adhd_game' && (getExerciseById(activeExercise)?.exercise as ADHDGameExercise).gameType === 'color_focus'",
};

pub const GAME_TYPE_MEMORY_SEQUENCE: RewriteRule = RewriteRule {
    id: "game-type-memory-sequence",
    description: "require type === 'adhd_game' before comparing gameType to 'memory_sequence'",
    pattern: r#"getExerciseById\(activeExercise\)\?\.exercise\s*\.gameType === "memory_sequence""#,
    replacement: "getExerciseById(activeExercise)?.exercise.type === 'adhd_game' && (getExerciseById(activeExercise)?.exercise as ADHDGameExercise).gameType === 'memory_sequence'",
};

/// `instructions` exists on the guided, adhd_game and breathing variants only.
pub const SHARED_INSTRUCTIONS: RewriteRule = RewriteRule {
    id: "shared-instructions",
    description: "guard instructions behind the three variants that carry it, fall back to []",
    pattern: r"getExerciseById\(activeExercise\)\?\.exercise\s*\.instructions",
    replacement: "((getExerciseById(activeExercise)?.exercise.type === 'guided' || getExerciseById(activeExercise)?.exercise.type === 'adhd_game' || getExerciseById(activeExercise)?.exercise.type === 'breathing') ? (getExerciseById(activeExercise)?.exercise as any).instructions : [])",
};

/// All built-in rules in application order.
pub const BUILTIN_RULES: [RewriteRule; 5] = [
    JOURNAL_PROMPT_COUNT,
    JOURNAL_PROMPT_STEP,
    GAME_TYPE_COLOR_FOCUS,
    GAME_TYPE_MEMORY_SEQUENCE,
    SHARED_INSTRUCTIONS,
];
