// Crema - Semantic analysis for a small statically-typed imperative language
//
// Copyright (C) 2026 Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Analyzer configuration.

/// How a variable's initializer sees the variable being declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfReference {
    /// The initializer is checked before the variable is declared, so
    /// `int x = x` refers to an enclosing `x` or fails as undeclared.
    #[default]
    Reject,
    /// The variable is declared first and its own initializer can see it.
    Allow,
}

/// How many failures a single analysis reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop at the first failure anywhere in the program.
    #[default]
    FailFast,
    /// Stop at the first failure inside each top-level item, then carry on
    /// with the next item.
    PerItem,
}

/// Options controlling a semantic analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Visibility of a variable inside its own initializer.
    pub self_reference: SelfReference,
    /// Error reporting mode.
    pub error_mode: ErrorMode,
    /// Register every top-level function and structure before checking
    /// anything, allowing forward references.
    pub hoist_declarations: bool,
    /// Require non-void functions to return on every path.
    pub require_return: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            self_reference: SelfReference::default(),
            error_mode: ErrorMode::default(),
            hoist_declarations: false,
            require_return: true,
        }
    }
}

impl AnalyzerOptions {
    /// Set how initializers see the variable being declared.
    pub fn with_self_reference(mut self, self_reference: SelfReference) -> Self {
        self.self_reference = self_reference;
        self
    }

    /// Set the error reporting mode.
    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    /// Enable or disable hoisting of top-level declarations.
    pub fn with_hoisting(mut self, hoist: bool) -> Self {
        self.hoist_declarations = hoist;
        self
    }

    /// Enable or disable the missing-return check.
    pub fn with_required_return(mut self, require: bool) -> Self {
        self.require_return = require;
        self
    }
}
