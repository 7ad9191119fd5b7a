// SPDX-FileCopyrightText: © 2025 xdna-rs contributors
// SPDX-License-Identifier: Apache-2.0

pub use xdna_core;
pub use xdna_kmd;
pub use xdna_uapi;
