// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — filesystem glue around the render pipeline: the output
// directory, the background-image pool, and the substitution filter.

pub mod backgrounds;
pub mod output_dir;
pub mod substitutions;
