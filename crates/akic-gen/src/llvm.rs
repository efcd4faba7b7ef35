//! AST → LLIR lowering: the code generator itself.
//!
//! One `CodeGen` owns one `inkwell::Module` for the lifetime of a
//! `compile()` call. `eval()` walks the AST top-level by top-level;
//! a failure in one item is recorded and does not stop the others from
//! being emitted, matching the "errors are terminal for the current
//! top-level, not the module" rule.

use std::collections::HashMap;

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::targets::{CodeModel, RelocMode, Target, TargetTriple};
use inkwell::types::BasicType;
use inkwell::values::{BasicValue, BasicValueEnum, FunctionValue, PointerValue};
use inkwell::{FloatPredicate, IntPredicate, OptimizationLevel};

use akic_par::ast::{
    Argument, Ast, BinOp, CmpOp, Expr, External, Function, Literal, LoopHeader, NameNode,
    Prototype, TopLevel, UnOp, VarType,
};
use akic_sem::{common_numeric_type, mangle, resolve_call, FuncScope, ModuleScope, Operand, OverloadSignature, PrimKind, Type, TypeRegistry};
use akic_util::{Diagnostic, Interner, Position, Symbol};

use crate::error::{CodegenError, CodegenWarning, Result};
use crate::types::TypeMapper;

/// A registered module-level function: its LLVM value plus the argument
/// signature `mangle`/`resolve_call` need to pick it at a call site.
#[derive(Clone)]
struct FunctionEntry<'ctx> {
    value: FunctionValue<'ctx>,
    required: Vec<Type>,
    optional: Vec<Type>,
    /// Default-value expressions for `optional`, same order/length. A call
    /// that omits a trailing optional argument has its value filled in
    /// from here rather than being rejected.
    defaults: Vec<Expr>,
    return_type: Type,
    /// False for a forward declaration (an `extern`, or a `def` prototype
    /// that has not yet received a body). A second `def` with the same
    /// signature clears and re-emits the body rather than erroring.
    defined: bool,
}

/// A local binding: its stack slot, declared type, and whether it owns
/// heap storage that must be disposed on scope exit.
struct Slot<'ctx> {
    ptr: PointerValue<'ctx>,
    ty: Type,
    tracked: bool,
}

pub struct CodeGen<'ctx> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
    module_name: String,
    target_triple: String,
    registry: TypeRegistry,
    type_mapper: TypeMapper<'ctx>,
    interner: Interner,
    functions: ModuleScope<FunctionEntry<'ctx>>,
    /// Candidate signatures per unmangled base name, for `resolve_call`.
    overloads: HashMap<String, Vec<OverloadSignature>>,
    pragmas: HashMap<String, String>,
    pub warnings: Vec<Diagnostic>,
    pub suppress_warnings: bool,
    anon_counter: u32,

    // Per-function state, valid only while lowering one function body.
    func_scope: FuncScope<Slot<'ctx>>,
    declared_stack: Vec<Vec<Symbol>>,
    loop_stack: Vec<BasicBlock<'ctx>>,
    return_slot: Option<PointerValue<'ctx>>,
    return_type: Option<Type>,
}

impl<'ctx> CodeGen<'ctx> {
    /// Builds a fresh code generator over a new LLVM module named
    /// `module_name`, targeting `target_triple`. `registry` supplies the
    /// canonical type set (and should itself be built `for_triple` the
    /// same triple).
    pub fn new(context: &'ctx Context, module_name: &str, target_triple: &str, registry: TypeRegistry) -> Self {
        let module = build_module(context, module_name, target_triple);
        Self {
            context,
            module,
            builder: context.create_builder(),
            module_name: module_name.to_string(),
            target_triple: target_triple.to_string(),
            registry,
            type_mapper: TypeMapper::new(context),
            interner: Interner::new(),
            functions: ModuleScope::new(),
            overloads: HashMap::new(),
            pragmas: HashMap::new(),
            warnings: Vec::new(),
            suppress_warnings: false,
            anon_counter: 0,
            func_scope: FuncScope::new(),
            declared_stack: Vec::new(),
            loop_stack: Vec::new(),
            return_slot: None,
            return_type: None,
        }
    }

    /// Drops the old module and all module-wide state, starting a fresh
    /// compilation over the same context/target.
    pub fn reset(&mut self) {
        self.module = build_module(self.context, &self.module_name, &self.target_triple);
        self.interner = Interner::new();
        self.functions = ModuleScope::new();
        self.overloads.clear();
        self.pragmas.clear();
        self.warnings.clear();
        self.anon_counter = 0;
    }

    pub fn module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// Lowers every top-level item in order. Returns the errors raised by
    /// the items that failed; items that succeeded remain in the module.
    pub fn eval(&mut self, ast: &Ast) -> Vec<CodegenError> {
        let mut errors = Vec::new();
        for item in ast {
            if let Err(e) = self.eval_toplevel(item) {
                errors.push(e);
            }
        }
        errors
    }

    fn eval_toplevel(&mut self, item: &TopLevel) -> Result<()> {
        match item {
            TopLevel::Function(f) => self.eval_function(f),
            TopLevel::External(e) => self.eval_external(e),
            TopLevel::Uniform(names) => self.eval_uniform(names),
            TopLevel::Pragma(text, pos) => self.eval_pragma(text, pos),
            TopLevel::Expression(expr) => self.eval_anonymous_expression(expr),
        }
    }

    // ---- prototypes / declarations ----------------------------------

    fn resolve_vartype(&mut self, vt: &VarType, pos: &Position) -> Result<Type> {
        self.registry
            .resolve_vartype(vt)
            .ok_or_else(|| CodegenError::UnknownSymbol(format!("unknown type at {}:{}", pos.line, pos.col)))
    }

    /// Declares (or re-validates) the LLVM function for `proto`. Returns
    /// its value plus the split required/optional argument types.
    fn ensure_function(&mut self, proto: &Prototype, is_extern: bool) -> Result<(FunctionValue<'ctx>, Vec<Type>, Vec<Type>, Type)> {
        let mut required = Vec::new();
        let mut optional = Vec::new();
        let mut defaults = Vec::new();
        let mut llvm_params = Vec::new();
        let mut seen_optional = false;
        for arg in &proto.args {
            let ty = self.resolve_vartype(&arg.declared_type, &arg.position)?;
            llvm_params.push(self.type_mapper.map(&ty)?.into());
            if let Some(default_expr) = &arg.default {
                seen_optional = true;
                optional.push(ty);
                defaults.push((**default_expr).clone());
            } else if seen_optional {
                return Err(CodegenError::TypeMismatch(format!(
                    "required argument '{}' follows an optional argument",
                    arg.name
                )));
            } else {
                required.push(ty);
            }
        }
        let return_type = self.resolve_vartype(&proto.return_type, &proto.position)?;
        let ret_llvm = self.type_mapper.map(&return_type)?;
        let fn_ty = ret_llvm.fn_type(&llvm_params, false);

        let mangled = if is_extern || proto.name == "main" || proto.name.starts_with("_ANON_") {
            proto.name.clone()
        } else {
            mangle(&proto.name, &required, &optional)
        };

        if let Some(existing) = self.functions.get(&mangled) {
            let old_arity = existing.required.len() + existing.optional.len();
            let new_arity = required.len() + optional.len();
            if old_arity != new_arity {
                return Err(CodegenError::ArgumentCountMismatch {
                    name: proto.name.clone(),
                    old: old_arity,
                    new: new_arity,
                });
            }
            let value = existing.value;
            let defined = existing.defined;
            self.functions.insert(
                mangled.clone(),
                FunctionEntry { value, required: required.clone(), optional: optional.clone(), defaults, return_type: return_type.clone(), defined },
            );
            return Ok((value, required, optional, return_type));
        }

        let linkage = if is_extern { Linkage::External } else { Linkage::Private };
        let value = self.module.add_function(&mangled, fn_ty, Some(linkage));
        self.apply_calling_convention(value, proto, is_extern);

        self.functions.insert(
            mangled.clone(),
            FunctionEntry { value, required: required.clone(), optional: optional.clone(), defaults, return_type: return_type.clone(), defined: false },
        );
        self.overloads.entry(proto.name.clone()).or_default().push(OverloadSignature {
            mangled_name: mangled,
            required: required.clone(),
            optional: optional.clone(),
        });
        Ok((value, required, optional, return_type))
    }

    /// `inline`/`noinline`/`varfunc`/`main` attribute handling; the
    /// calling convention itself (`fastcc` for non-extern, non-varargs
    /// functions) is set once here rather than per call site.
    fn apply_calling_convention(&self, value: FunctionValue<'ctx>, proto: &Prototype, is_extern: bool) {
        if is_extern {
            return;
        }
        // inkwell's "fastcc" numeric id; kept as a named constant so the
        // call site reads like the ABI concept it represents.
        const FASTCC: u32 = 8;
        value.set_call_conventions(FASTCC);

        let has_inline = proto.decorators.iter().any(|d| d == "inline") || proto.is_operator;
        let has_noinline = proto.decorators.iter().any(|d| d == "noinline")
            || proto.decorators.iter().any(|d| d == "varfunc")
            || proto.name == "main";
        if has_inline {
            add_fn_attr(self.context, value, "alwaysinline");
        }
        if has_noinline {
            add_fn_attr(self.context, value, "noinline");
            add_fn_attr(self.context, value, "optnone");
        }
    }

    fn check_decorator_conflicts(&self, proto: &Prototype) -> Result<()> {
        let inline = proto.decorators.iter().any(|d| d == "inline");
        let noinline = proto.decorators.iter().any(|d| d == "noinline");
        if inline && noinline {
            return Err(CodegenError::DecoratorConflict(format!(
                "'{}' cannot be both inline and noinline",
                proto.name
            )));
        }
        Ok(())
    }

    fn eval_external(&mut self, ext: &External) -> Result<()> {
        self.ensure_function(&ext.proto, true)?;
        Ok(())
    }

    fn eval_function(&mut self, f: &Function) -> Result<()> {
        self.check_decorator_conflicts(&f.proto)?;
        let (fn_value, _required, _optional, return_type) = self.ensure_function(&f.proto, false)?;
        let mangled_name = fn_value
            .get_name()
            .to_str()
            .map_err(|_| CodegenError::Internal("function name is not valid UTF-8".into()))?
            .to_string();

        let exit = self.emit_function_body(fn_value, &f.proto, return_type)?;
        self.emit_function_body_inner(fn_value, &f.proto, &f.body, exit)?;

        if let Some(entry) = self.functions.get(&mangled_name) {
            let entry = entry.clone();
            self.functions.insert(mangled_name, FunctionEntry { defined: true, ..entry });
        }
        Ok(())
    }

    /// Clears any stale blocks from a prior forward declaration, then sets
    /// up `entry`/`exit`, the `%_return` slot, and the argument bindings.
    /// Returns the `exit` block so the caller can lower the body into it.
    fn emit_function_body(&mut self, fn_value: FunctionValue<'ctx>, proto: &Prototype, return_type: Type) -> Result<BasicBlock<'ctx>> {
        for block in fn_value.get_basic_blocks() {
            // Safety of this removal is bounded by the fact that a
            // forward declaration never has instructions referencing it.
            let _ = block.remove_from_function();
        }

        let entry = self.context.append_basic_block(fn_value, "entry");
        let exit = self.context.append_basic_block(fn_value, "exit");
        self.builder.position_at_end(entry);

        self.func_scope = FuncScope::new();
        self.declared_stack = vec![Vec::new()];
        self.loop_stack = Vec::new();

        let ret_llvm = self.type_mapper.map(&return_type)?;
        let return_slot = self.builder.build_alloca(ret_llvm, "_return").map_err(llvm_err)?;
        self.return_slot = Some(return_slot);
        self.return_type = Some(return_type);

        self.bind_arguments(fn_value, proto)?;
        Ok(exit)
    }

    fn bind_arguments(&mut self, fn_value: FunctionValue<'ctx>, proto: &Prototype) -> Result<()> {
        for (i, arg) in proto.args.iter().enumerate() {
            let param = fn_value
                .get_nth_param(i as u32)
                .ok_or_else(|| CodegenError::Internal(format!("missing parameter #{i} for '{}'", proto.name)))?;
            let ty = self.resolve_vartype(&arg.declared_type, &arg.position)?;
            let slot_ptr = if is_object_pointer(&ty) {
                param.into_pointer_value()
            } else {
                let llvm_ty = self.type_mapper.map(&ty)?;
                let alloca = self.builder.build_alloca(llvm_ty, &arg.name).map_err(llvm_err)?;
                self.builder.build_store(alloca, param).map_err(llvm_err)?;
                alloca
            };
            let sym = self.interner.intern(&arg.name);
            self.func_scope
                .declare(sym, Slot { ptr: slot_ptr, ty, tracked: false })
                .map_err(|_| CodegenError::Redefinition(arg.name.clone()))?;
            self.declared_stack.last_mut().unwrap().push(sym);
        }
        Ok(())
    }

    /// Lowers the body expression, coerces/validates it against the
    /// declared return type, stores it, auto-disposes tracked locals, and
    /// terminates into `exit` / `ret`.
    fn emit_function_body_inner(&mut self, fn_value: FunctionValue<'ctx>, proto: &Prototype, body: &Expr, exit: BasicBlock<'ctx>) -> Result<()> {
        let _ = fn_value;
        let (value, value_ty) = self.lower_expr(body)?;
        let declared = self.return_type.clone().unwrap();
        let is_anonymous = proto.name.starts_with("_ANON_");

        let final_ty = if matches!(declared, Type::Unset) || is_anonymous {
            value_ty.clone()
        } else if declared == value_ty {
            declared.clone()
        } else if (declared.is_integer() || declared.is_float()) && (value_ty.is_integer() || value_ty.is_float()) {
            declared.clone()
        } else {
            return Err(CodegenError::TypeMismatch(format!(
                "'{}' declared to return {:?} but its body yields {:?}",
                proto.name, declared, value_ty
            )));
        };

        let returned_name = returned_binding_name(body);
        let skip = returned_name.and_then(|n| Some(self.interner.intern(&n)));

        self.auto_dispose_top(skip)?;

        if let Some(slot) = self.return_slot {
            self.builder.build_store(slot, value).map_err(llvm_err)?;
        }
        self.builder.build_unconditional_branch(exit).map_err(llvm_err)?;

        self.builder.position_at_end(exit);
        if let Some(slot) = self.return_slot {
            let ret_llvm = self.type_mapper.map(&final_ty)?;
            let loaded = self.builder.build_load(ret_llvm, slot, "_return_val").map_err(llvm_err)?;
            self.builder.build_return(Some(&loaded)).map_err(llvm_err)?;
        }
        Ok(())
    }

    fn auto_dispose_top(&mut self, skip: Option<Symbol>) -> Result<()> {
        let declared = self.declared_stack.pop().unwrap_or_default();
        self.dispose_declared(&declared, skip)
    }

    fn dispose_declared(&mut self, declared: &[Symbol], skip: Option<Symbol>) -> Result<()> {
        for &sym in declared.iter().rev() {
            if Some(sym) == skip {
                continue;
            }
            let (ptr, ty, tracked) = match self.func_scope.resolve(sym) {
                Some(slot) => (slot.ptr, slot.ty.clone(), slot.tracked),
                None => continue,
            };
            if !tracked {
                continue;
            }
            let dispose_name = mangle("__del__", &[ty], &[]);
            if let Some(entry) = self.functions.get(&dispose_name) {
                let entry = entry.clone();
                self.builder
                    .build_call(entry.value, &[ptr.into()], "dispose")
                    .map_err(llvm_err)?;
            }
        }
        Ok(())
    }

    // ---- globals ------------------------------------------------------

    fn eval_uniform(&mut self, names: &[NameNode]) -> Result<()> {
        for name in names {
            self.eval_global_binding(name)?;
        }
        Ok(())
    }

    fn eval_global_binding(&mut self, name: &NameNode) -> Result<()> {
        let declared = self.resolve_vartype(&name.declared_type, &name.position)?;

        if let (Type::Array { element, length }, Some(init)) = (&declared, &name.initializer) {
            return self.eval_global_array(&name.id, element, *length, init, &name.position);
        }

        let ty = if matches!(declared, Type::Unset) {
            match &name.initializer {
                Some(init) => self.infer_literal_type(init)?,
                None => return Err(CodegenError::TypeMismatch(format!("'{}' needs a type or an initializer", name.id))),
            }
        } else {
            declared
        };
        let llvm_ty = self.type_mapper.map(&ty)?;
        let global = self.module.add_global(llvm_ty, None, &name.id);
        if let Some(init) = &name.initializer {
            let (value, _) = self.lower_const_expr(init)?;
            global.set_initializer(&value);
        } else {
            global.set_initializer(&zero_of(llvm_ty));
        }
        Ok(())
    }

    /// `0` means "infer the length from the initializer"; a literal longer
    /// than its declared length overflows, a shorter one warns and is
    /// zero-padded. Shared by the global (`uni`) and local (`var`/`with`)
    /// array-binding paths so the zero-fill/overflow semantics only live
    /// in one place.
    fn resolve_array_length(&mut self, given: u64, declared_len: u64, pos: &Position) -> Result<u64> {
        let effective_len = if declared_len == 0 { given } else { declared_len };
        if given > effective_len {
            return Err(CodegenError::ArrayOverflow { given, declared: effective_len });
        }
        if given < effective_len && !self.suppress_warnings {
            self.warnings.push(Diagnostic::warning(
                CodegenWarning { given, declared: effective_len }.to_string(),
                pos.clone(),
            ));
        }
        Ok(effective_len)
    }

    fn eval_global_array(&mut self, name: &str, element: &Type, declared_len: u64, init: &Expr, pos: &Position) -> Result<()> {
        let elems = match init {
            Expr::Array(items, _) => items,
            other => return Err(CodegenError::TypeMismatch(format!("expected an array literal to initialize '{name}', got {other:?}"))),
        };
        let effective_len = self.resolve_array_length(elems.len() as u64, declared_len, pos)?;

        let elem_llvm = self.type_mapper.map(element)?;
        let mut values = Vec::with_capacity(effective_len as usize);
        for e in elems {
            let (v, _) = self.lower_const_expr(e)?;
            values.push(v);
        }
        while (values.len() as u64) < effective_len {
            values.push(zero_of(elem_llvm));
        }

        let array_ty = elem_llvm.array_type(effective_len as u32);
        let global = self.module.add_global(array_ty, None, name);
        let const_array = build_const_array(elem_llvm, &values);
        global.set_initializer(&const_array);
        Ok(())
    }

    fn eval_pragma(&mut self, text: &str, pos: &Position) -> Result<()> {
        let (key, value) = text
            .split_once('=')
            .ok_or_else(|| CodegenError::InvalidPragma(text.to_string()))?;
        let key = key.trim().to_string();
        let value = value.trim().to_string();
        if key.is_empty() {
            return Err(CodegenError::InvalidPragma(text.to_string()));
        }
        let _ = pos;
        self.pragmas.insert(key, value);
        Ok(())
    }

    fn eval_anonymous_expression(&mut self, expr: &Expr) -> Result<()> {
        let name = format!("_ANON_{}", self.anon_counter);
        self.anon_counter += 1;
        let proto = Prototype {
            name,
            args: Vec::new(),
            return_type: VarType::unset(),
            position: expr.position().clone(),
            decorators: Vec::new(),
            is_operator: false,
        };
        let function = Function { proto, body: expr.clone() };
        self.eval_function(&function)
    }

    // ---- expressions ----------------------------------------------------

    fn infer_literal_type(&mut self, expr: &Expr) -> Result<Type> {
        let (_, ty) = self.lower_expr(expr)?;
        Ok(ty)
    }

    /// Lowers an expression expected to be usable as a global initializer
    /// (a constant). This codebase has no constant-folding pass, so only
    /// literal nodes are accepted here; anything else is a codegen error
    /// rather than a silent runtime initializer.
    fn lower_const_expr(&mut self, expr: &Expr) -> Result<(BasicValueEnum<'ctx>, Type)> {
        match expr {
            Expr::Constant(..) | Expr::String(..) => self.lower_expr(expr),
            other => Err(CodegenError::TypeMismatch(format!(
                "global initializers must be literal constants, got {other:?}"
            ))),
        }
    }

    fn lower_expr(&mut self, expr: &Expr) -> Result<(BasicValueEnum<'ctx>, Type)> {
        match expr {
            Expr::Constant(lit, vt, pos) => self.lower_constant(lit, vt, pos),
            Expr::String(bytes, _, _) => self.lower_string(bytes),
            Expr::Array(_, pos) => Err(CodegenError::TypeMismatch(format!(
                "array literal at {}:{} used outside of a declaration with a known element type",
                pos.line, pos.col
            ))),
            Expr::Name(n) => self.lower_name_rvalue(n),
            Expr::UnOp(op, operand, pos) => self.lower_unop(*op, operand, pos),
            Expr::BinOp(op, lhs, rhs, pos) => self.lower_binop(*op, lhs, rhs, pos),
            Expr::BinOpComparison(op, lhs, rhs, pos) => self.lower_comparison(*op, lhs, rhs, pos),
            Expr::Call(name, args, _, pos) => self.lower_call(name, args, pos),
            Expr::ChainExpr(steps, pos) => self.lower_chain(steps, pos),
            Expr::RefExpr(_, pos) | Expr::DerefExpr(_, pos) => Err(CodegenError::Internal(format!(
                "reference/dereference expressions have no surface syntax to reach codegen ({}:{})",
                pos.line, pos.col
            ))),
            Expr::VarList(names, _) => self.lower_var_list(names),
            Expr::Assignment(target, value, pos) => self.lower_assignment(target, value, pos),
            Expr::ExpressionBlock(exprs, _) => self.lower_block(exprs),
            Expr::IfExpr(cond, then, els, pos) => self.lower_if(cond, then, els, pos),
            Expr::WhenExpr(cond, then, els, pos) => self.lower_when(cond, then, els.as_deref(), pos),
            Expr::LoopExpr(header, body, pos) => self.lower_loop(header.as_ref(), body, pos),
            Expr::Break(pos) => self.lower_break(pos),
            Expr::WithExpr(names, body, _) => self.lower_with(names, body),
        }
    }

    fn lower_constant(&mut self, lit: &Literal, vt: &VarType, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let ty = self.resolve_vartype(vt, pos)?;
        let llvm_ty = self.type_mapper.map(&ty)?;
        let value: BasicValueEnum = match lit {
            Literal::Int(i) => llvm_ty.into_int_type().const_int(*i as u64, true).into(),
            Literal::UInt(u) => llvm_ty.into_int_type().const_int(*u, false).into(),
            Literal::Float(bits) => llvm_ty.into_float_type().const_float(f64::from_bits(*bits)).into(),
            Literal::Bool(b) => self.context.bool_type().const_int(*b as u64, false).into(),
        };
        Ok((value, ty))
    }

    fn lower_string(&mut self, bytes: &[u8]) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let text = String::from_utf8_lossy(bytes);
        let global = self
            .builder
            .build_global_string_ptr(&text, "str_lit")
            .map_err(llvm_err)?;
        let byte_ptr = self.registry.pointer(self.registry.byte());
        Ok((global.as_pointer_value().into(), byte_ptr))
    }

    fn lower_name_rvalue(&mut self, n: &NameNode) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let sym = self.interner.intern(&n.id);
        let slot = self
            .func_scope
            .resolve(sym)
            .ok_or_else(|| CodegenError::UnknownSymbol(n.id.clone()))?;
        let (ptr, ty) = (slot.ptr, slot.ty.clone());
        Ok((self.load_slot(ptr, &ty)?, ty))
    }

    /// Object-typed (and pointer-to-object-typed) slots are always
    /// manipulated via pointer, so their "value" is the pointer itself;
    /// every other slot is loaded through.
    fn load_slot(&mut self, ptr: PointerValue<'ctx>, ty: &Type) -> Result<BasicValueEnum<'ctx>> {
        if is_object_pointer(ty) {
            Ok(ptr.into())
        } else {
            let llvm_ty = self.type_mapper.map(ty)?;
            Ok(self.builder.build_load(llvm_ty, ptr, "load").map_err(llvm_err)?)
        }
    }

    fn lower_name_lvalue(&mut self, n: &NameNode) -> Result<(PointerValue<'ctx>, Type)> {
        let sym = self.interner.intern(&n.id);
        let slot = self
            .func_scope
            .resolve(sym)
            .ok_or_else(|| CodegenError::UnknownSymbol(n.id.clone()))?;
        Ok((slot.ptr, slot.ty.clone()))
    }

    fn lower_unop(&mut self, op: UnOp, operand: &Expr, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let (value, ty) = self.lower_expr(operand)?;
        let _ = pos;
        match op {
            UnOp::Neg if ty.is_integer() => {
                let zero = self.type_mapper.map(&ty)?.into_int_type().const_zero();
                let result = self
                    .builder
                    .build_int_sub(zero, value.into_int_value(), "neg")
                    .map_err(llvm_err)?;
                Ok((result.into(), ty))
            }
            UnOp::Neg if ty.is_float() => {
                let result = self.builder.build_float_neg(value.into_float_value(), "fneg").map_err(llvm_err)?;
                Ok((result.into(), ty))
            }
            UnOp::Not => {
                let b = coerce_to_bool(&self.builder, value, &ty)?;
                let result = self.builder.build_not(b, "not").map_err(llvm_err)?;
                Ok((result.into(), Type::Primitive { kind: PrimKind::Bool, bits: 1 }))
            }
            _ => Err(CodegenError::TypeMismatch(format!("unary '-' is not defined for {ty:?}"))),
        }
    }

    fn lower_binop(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let (lval, lty) = self.lower_expr(lhs)?;
        let (rval, rty) = self.lower_expr(rhs)?;
        let _ = pos;

        if matches!(op, BinOp::And | BinOp::Or | BinOp::BitAnd | BinOp::BitOr) {
            let lb = coerce_to_bool_or_int(&self.builder, lval, &lty)?;
            let rb = coerce_to_bool_or_int(&self.builder, rval, &rty)?;
            let result = match op {
                BinOp::And | BinOp::BitAnd => self.builder.build_and(lb, rb, "and"),
                BinOp::Or | BinOp::BitOr => self.builder.build_or(lb, rb, "or"),
                _ => unreachable!(),
            }
            .map_err(llvm_err)?;
            let ty = if matches!(op, BinOp::And | BinOp::Or) {
                Type::Primitive { kind: PrimKind::Bool, bits: 1 }
            } else {
                lty
            };
            return Ok((result.into(), ty));
        }

        let common = common_numeric_type(&lty, operand_kind(lhs), &rty, operand_kind(rhs))
            .map_err(|e| CodegenError::TypeMismatch(e.to_string()))?;
        let lval = self.coerce_numeric(lval, &lty, &common)?;
        let rval = self.coerce_numeric(rval, &rty, &common)?;

        let value = if common.is_float() {
            let (l, r) = (lval.into_float_value(), rval.into_float_value());
            match op {
                BinOp::Add => self.builder.build_float_add(l, r, "fadd"),
                BinOp::Sub => self.builder.build_float_sub(l, r, "fsub"),
                BinOp::Mul => self.builder.build_float_mul(l, r, "fmul"),
                BinOp::Div | BinOp::IDiv => self.builder.build_float_div(l, r, "fdiv"),
                _ => unreachable!("and/or/bit handled above"),
            }
            .map_err(llvm_err)?
            .into()
        } else {
            let (l, r) = (lval.into_int_value(), rval.into_int_value());
            let signed = common.is_signed_int();
            match op {
                BinOp::Add => self.builder.build_int_add(l, r, "add").map_err(llvm_err)?.into(),
                BinOp::Sub => self.builder.build_int_sub(l, r, "sub").map_err(llvm_err)?.into(),
                BinOp::Mul => self.builder.build_int_mul(l, r, "mul").map_err(llvm_err)?.into(),
                BinOp::Div | BinOp::IDiv if signed => {
                    self.builder.build_int_signed_div(l, r, "sdiv").map_err(llvm_err)?.into()
                }
                BinOp::Div | BinOp::IDiv => self.builder.build_int_unsigned_div(l, r, "udiv").map_err(llvm_err)?.into(),
                _ => unreachable!("and/or/bit handled above"),
            }
        };
        Ok((value, common))
    }

    fn coerce_numeric(&mut self, value: BasicValueEnum<'ctx>, from: &Type, to: &Type) -> Result<BasicValueEnum<'ctx>> {
        if from == to {
            return Ok(value);
        }
        let to_llvm = self.type_mapper.map(to)?;
        if to.is_float() && from.is_integer() {
            let float_ty = to_llvm.into_float_type();
            let result = if from.is_signed_int() {
                self.builder.build_signed_int_to_float(value.into_int_value(), float_ty, "sitofp")
            } else {
                self.builder.build_unsigned_int_to_float(value.into_int_value(), float_ty, "uitofp")
            };
            return Ok(result.map_err(llvm_err)?.into());
        }
        if to.is_float() && from.is_float() {
            let result = self
                .builder
                .build_float_ext(value.into_float_value(), to_llvm.into_float_type(), "fext")
                .map_err(llvm_err)?;
            return Ok(result.into());
        }
        if to.is_integer() && from.is_integer() {
            let int_ty = to_llvm.into_int_type();
            let result = if from.is_signed_int() {
                self.builder.build_int_s_extend_or_bit_cast(value.into_int_value(), int_ty, "sext")
            } else {
                self.builder.build_int_z_extend_or_bit_cast(value.into_int_value(), int_ty, "zext")
            };
            return Ok(result.map_err(llvm_err)?.into());
        }
        Ok(value)
    }

    fn lower_comparison(&mut self, op: CmpOp, lhs: &Expr, rhs: &Expr, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let (lval, lty) = self.lower_expr(lhs)?;
        let (rval, rty) = self.lower_expr(rhs)?;
        let _ = pos;
        let common = common_numeric_type(&lty, operand_kind(lhs), &rty, operand_kind(rhs))
            .map_err(|e| CodegenError::TypeMismatch(e.to_string()))?;
        let lval = self.coerce_numeric(lval, &lty, &common)?;
        let rval = self.coerce_numeric(rval, &rty, &common)?;
        let bool_ty = Type::Primitive { kind: PrimKind::Bool, bits: 1 };

        let value: BasicValueEnum = if common.is_float() {
            let pred = float_predicate(op);
            self.builder
                .build_float_compare(pred, lval.into_float_value(), rval.into_float_value(), "fcmp")
                .map_err(llvm_err)?
                .into()
        } else {
            let pred = int_predicate(op, common.is_signed_int());
            self.builder
                .build_int_compare(pred, lval.into_int_value(), rval.into_int_value(), "icmp")
                .map_err(llvm_err)?
                .into()
        };
        Ok((value, bool_ty))
    }

    fn lower_call(&mut self, name: &str, args: &[Argument], pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let mut arg_values = Vec::with_capacity(args.len());
        let mut arg_types = Vec::with_capacity(args.len());
        for a in args {
            let expr = a
                .default
                .as_deref()
                .ok_or_else(|| CodegenError::Internal("call argument missing its value".into()))?;
            let (v, t) = self.lower_expr(expr)?;
            arg_values.push(v);
            arg_types.push(t);
        }
        self.lower_call_with_values(name, arg_values, arg_types, pos)
    }

    fn lower_call_with_values(
        &mut self,
        name: &str,
        mut arg_values: Vec<BasicValueEnum<'ctx>>,
        mut arg_types: Vec<Type>,
        pos: &Position,
    ) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let candidates = self.overloads.get(name).cloned().unwrap_or_default();
        let signature = resolve_call(name, &arg_types, &candidates)
            .cloned()
            .ok_or_else(|| CodegenError::NoMatchingOverload { name: name.to_string() })?;
        let entry = self
            .functions
            .get(&signature.mangled_name)
            .cloned()
            .ok_or_else(|| CodegenError::UnknownSymbol(signature.mangled_name.clone()))?;

        // `resolve_call` may have matched a shorter prefix against an
        // overload that declares optional (defaulted) trailing parameters;
        // lower and append each omitted one's default expression, in
        // declaration order, before emitting the call.
        let supplied_optional = arg_values.len().saturating_sub(signature.required.len());
        for default_expr in entry.defaults[supplied_optional..].to_vec() {
            let (v, t) = self.lower_expr(&default_expr)?;
            arg_values.push(v);
            arg_types.push(t);
        }
        let _ = pos;

        let call_args: Vec<inkwell::values::BasicMetadataValueEnum> = arg_values.iter().map(|v| (*v).into()).collect();
        let call = self.builder.build_call(entry.value, &call_args, "call").map_err(llvm_err)?;
        let ret_ty = entry.return_type.clone();
        let value = call
            .try_as_basic_value()
            .left()
            .ok_or_else(|| CodegenError::Internal(format!("call to '{name}' produced no value")))?;
        Ok((value, ret_ty))
    }

    fn lower_chain(&mut self, steps: &[Expr], pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let mut iter = steps.iter();
        let first = iter
            .next()
            .ok_or_else(|| CodegenError::Internal("empty chain expression".into()))?;
        let (mut value, mut ty) = self.lower_expr(first)?;
        for step in iter {
            match step {
                Expr::Call(name, args, _, call_pos) => {
                    let mut arg_values = vec![value];
                    let mut arg_types = vec![ty.clone()];
                    for a in args {
                        let expr = a
                            .default
                            .as_deref()
                            .ok_or_else(|| CodegenError::Internal("call argument missing its value".into()))?;
                        let (v, t) = self.lower_expr(expr)?;
                        arg_values.push(v);
                        arg_types.push(t);
                    }
                    let (v, t) = self.lower_call_with_values(name, arg_values, arg_types, call_pos)?;
                    value = v;
                    ty = t;
                }
                other => {
                    return Err(CodegenError::TypeMismatch(format!(
                        "named field access is not supported; only method-call chain steps are ({:?} at {}:{})",
                        other,
                        pos.line,
                        pos.col
                    )))
                }
            }
        }
        Ok((value, ty))
    }

    fn lower_var_list(&mut self, names: &[NameNode]) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let mut last = None;
        for n in names {
            last = Some(self.declare_binding(n)?);
        }
        last.ok_or_else(|| CodegenError::Internal("empty var list".into()))
    }

    fn declare_binding(&mut self, n: &NameNode) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let declared = self.resolve_vartype(&n.declared_type, &n.position)?;

        if let Type::Array { element, length } = &declared {
            if let Some(init) = &n.initializer {
                let element = (**element).clone();
                let length = *length;
                return self.declare_array_binding(n, &element, length, init);
            }
        }

        let (init_value, init_ty) = match &n.initializer {
            Some(init) => {
                let (v, t) = self.lower_expr(init)?;
                (Some(v), Some(t))
            }
            None => (None, None),
        };
        let ty = if matches!(declared, Type::Unset) {
            init_ty.clone().unwrap_or(Type::Unset)
        } else {
            declared
        };
        let llvm_ty = self.type_mapper.map(&ty)?;
        let ptr = self.builder.build_alloca(llvm_ty, &n.id).map_err(llvm_err)?;
        let value = if let Some(v) = init_value {
            let coerced = self.coerce_numeric(v, init_ty.as_ref().unwrap_or(&ty), &ty)?;
            self.builder.build_store(ptr, coerced).map_err(llvm_err)?;
            coerced
        } else {
            let zero = zero_of(llvm_ty);
            self.builder.build_store(ptr, zero).map_err(llvm_err)?;
            zero
        };
        let tracked = is_object_pointer(&ty);
        let sym = self.interner.intern(&n.id);
        self.func_scope
            .declare(sym, Slot { ptr, ty: ty.clone(), tracked })
            .map_err(|_| CodegenError::Redefinition(n.id.clone()))?;
        self.declared_stack.last_mut().unwrap().push(sym);
        Ok((value, ty))
    }

    /// The array counterpart of `declare_binding`'s scalar path: a local
    /// (`var`/`with`) array binding initialized from an array literal gets
    /// the same zero-fill/overflow treatment `eval_global_array` gives a
    /// module-level `uni`, but stores into a stack alloca element by
    /// element instead of building a single `const` initializer, since a
    /// local initializer's elements need not themselves be constants.
    fn declare_array_binding(&mut self, n: &NameNode, element: &Type, declared_len: u64, init: &Expr) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let elems = match init {
            Expr::Array(items, _) => items,
            other => {
                return Err(CodegenError::TypeMismatch(format!(
                    "expected an array literal to initialize '{}', got {other:?}",
                    n.id
                )))
            }
        };
        let effective_len = self.resolve_array_length(elems.len() as u64, declared_len, &n.position)?;
        let ty = Type::Array { element: Box::new(element.clone()), length: effective_len };

        let elem_llvm = self.type_mapper.map(element)?;
        let array_llvm = elem_llvm.array_type(effective_len as u32);
        let ptr = self.builder.build_alloca(array_llvm, &n.id).map_err(llvm_err)?;
        let index_ty = self.context.i32_type();

        for (i, e) in elems.iter().enumerate() {
            let (v, vt) = self.lower_expr(e)?;
            let coerced = self.coerce_numeric(v, &vt, element)?;
            let gep = unsafe {
                self.builder
                    .build_gep(array_llvm, ptr, &[index_ty.const_zero(), index_ty.const_int(i as u64, false)], "arr_elem")
                    .map_err(llvm_err)?
            };
            self.builder.build_store(gep, coerced).map_err(llvm_err)?;
        }
        for i in (elems.len() as u64)..effective_len {
            let zero = zero_of(elem_llvm);
            let gep = unsafe {
                self.builder
                    .build_gep(array_llvm, ptr, &[index_ty.const_zero(), index_ty.const_int(i, false)], "arr_elem")
                    .map_err(llvm_err)?
            };
            self.builder.build_store(gep, zero).map_err(llvm_err)?;
        }

        let tracked = is_object_pointer(&ty);
        let sym = self.interner.intern(&n.id);
        self.func_scope
            .declare(sym, Slot { ptr, ty: ty.clone(), tracked })
            .map_err(|_| CodegenError::Redefinition(n.id.clone()))?;
        self.declared_stack.last_mut().unwrap().push(sym);

        let loaded = self.builder.build_load(array_llvm, ptr, &n.id).map_err(llvm_err)?;
        Ok((loaded, ty))
    }

    fn lower_assignment(&mut self, target: &Expr, value: &Expr, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let name = match target {
            Expr::Name(n) => n,
            other => {
                return Err(CodegenError::TypeMismatch(format!(
                    "assignment target must be a name, got {other:?} at {}:{}",
                    pos.line, pos.col
                )))
            }
        };
        let (ptr, target_ty) = self.lower_name_lvalue(name)?;
        let (v, vty) = self.lower_expr(value)?;
        let coerced = self.coerce_numeric(v, &vty, &target_ty)?;
        self.builder.build_store(ptr, coerced).map_err(llvm_err)?;
        Ok((coerced, target_ty))
    }

    fn lower_block(&mut self, exprs: &[Expr]) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let mut last = (self.context.i32_type().const_zero().into(), Type::Primitive { kind: PrimKind::SignedInt, bits: 32 });
        for e in exprs {
            last = self.lower_expr(e)?;
            if matches!(e, Expr::Break(_)) {
                break;
            }
        }
        Ok(last)
    }

    fn lower_if(&mut self, cond: &Expr, then: &Expr, els: &Expr, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let (cond_val, cond_ty) = self.lower_expr(cond)?;
        let cond_bool = coerce_to_bool(&self.builder, cond_val, &cond_ty)?;
        let _ = pos;

        let function = self.current_function()?;
        let then_bb = self.context.append_basic_block(function, "then");
        let else_bb = self.context.append_basic_block(function, "else");
        let join_bb = self.context.append_basic_block(function, "ifjoin");

        self.builder.build_conditional_branch(cond_bool, then_bb, else_bb).map_err(llvm_err)?;

        self.builder.position_at_end(then_bb);
        let (then_val, then_ty) = self.lower_expr(then)?;
        let then_end = self.builder.get_insert_block().unwrap();
        let then_reaches_join = then_end.get_terminator().is_none();
        if then_reaches_join {
            self.builder.build_unconditional_branch(join_bb).map_err(llvm_err)?;
        }

        self.builder.position_at_end(else_bb);
        let (else_val, else_ty) = self.lower_expr(els)?;
        let else_end = self.builder.get_insert_block().unwrap();
        let else_reaches_join = else_end.get_terminator().is_none();
        if else_reaches_join {
            self.builder.build_unconditional_branch(join_bb).map_err(llvm_err)?;
        }

        self.builder.position_at_end(join_bb);
        let common = if then_ty == else_ty {
            then_ty
        } else {
            common_numeric_type(&then_ty, Operand::Value, &else_ty, Operand::Value)
                .map_err(|e| CodegenError::TypeMismatch(e.to_string()))?
        };
        let llvm_ty = self.type_mapper.map(&common)?;
        let phi = self.builder.build_phi(llvm_ty, "ifval").map_err(llvm_err)?;
        // A branch that already terminated (e.g. via `break`) never reaches
        // the join block, so it contributes no incoming value to the phi.
        let mut incoming: Vec<(&dyn BasicValue<'ctx>, BasicBlock<'ctx>)> = Vec::new();
        if then_reaches_join {
            incoming.push((&then_val, then_end));
        }
        if else_reaches_join {
            incoming.push((&else_val, else_end));
        }
        phi.add_incoming(&incoming);
        Ok((phi.as_basic_value(), common))
    }

    fn lower_when(&mut self, cond: &Expr, then: &Expr, els: Option<&Expr>, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        match els {
            Some(els_expr) => self.lower_if(cond, then, els_expr, pos),
            None => Err(CodegenError::WhenRequiresElseInValuePosition),
        }
    }

    fn lower_loop(&mut self, header: Option<&LoopHeader>, body: &Expr, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let function = self.current_function()?;
        let _ = pos;
        let header_bb = self.context.append_basic_block(function, "loophdr");
        let body_bb = self.context.append_basic_block(function, "loopbody");
        let after_bb = self.context.append_basic_block(function, "loopafter");

        if let Some(h) = header {
            if let Some(init) = &h.init {
                self.lower_expr(init)?;
            }
        }
        self.builder.build_unconditional_branch(header_bb).map_err(llvm_err)?;

        self.builder.position_at_end(header_bb);
        match header.and_then(|h| h.cond.as_ref()) {
            Some(cond) => {
                let (v, t) = self.lower_expr(cond)?;
                let b = coerce_to_bool(&self.builder, v, &t)?;
                self.builder.build_conditional_branch(b, body_bb, after_bb).map_err(llvm_err)?;
            }
            None => {
                self.builder.build_unconditional_branch(body_bb).map_err(llvm_err)?;
            }
        }

        self.builder.position_at_end(body_bb);
        self.loop_stack.push(after_bb);
        self.lower_expr(body)?;
        self.loop_stack.pop();
        // A `break` inside `body` already terminated the current block; the
        // step and the back-edge to the header only apply when it fell
        // through normally.
        if self.builder.get_insert_block().unwrap().get_terminator().is_none() {
            if let Some(step) = header.and_then(|h| h.step.as_ref()) {
                self.lower_expr(step)?;
            }
            self.builder.build_unconditional_branch(header_bb).map_err(llvm_err)?;
        }

        self.builder.position_at_end(after_bb);
        Ok((self.context.i32_type().const_zero().into(), Type::Primitive { kind: PrimKind::SignedInt, bits: 32 }))
    }

    fn lower_break(&mut self, pos: &Position) -> Result<(BasicValueEnum<'ctx>, Type)> {
        let target = *self.loop_stack.last().ok_or(CodegenError::BreakOutsideLoop)?;
        let _ = pos;
        self.builder.build_unconditional_branch(target).map_err(llvm_err)?;
        Ok((self.context.i32_type().const_zero().into(), Type::Primitive { kind: PrimKind::SignedInt, bits: 32 }))
    }

    fn lower_with(&mut self, names: &[NameNode], body: &Expr) -> Result<(BasicValueEnum<'ctx>, Type)> {
        self.func_scope.enter_scope();
        self.declared_stack.push(Vec::new());
        for n in names {
            self.declare_binding(n)?;
        }
        let result = self.lower_expr(body)?;
        let declared = self.declared_stack.pop().unwrap_or_default();
        self.dispose_declared(&declared, None)?;
        self.func_scope.exit_scope();
        Ok(result)
    }

    fn current_function(&self) -> Result<FunctionValue<'ctx>> {
        self.builder
            .get_insert_block()
            .and_then(|b| b.get_parent())
            .ok_or_else(|| CodegenError::Internal("no current function".into()))
    }
}

fn build_module<'ctx>(context: &'ctx Context, name: &str, triple: &str) -> Module<'ctx> {
    let module = context.create_module(name);
    let target_triple = TargetTriple::create(triple);
    module.set_triple(&target_triple);
    if let Ok(target) = Target::from_triple(&target_triple) {
        if let Some(machine) = target.create_target_machine(
            &target_triple,
            "generic",
            "",
            OptimizationLevel::None,
            RelocMode::Default,
            CodeModel::Default,
        ) {
            module.set_data_layout(&machine.get_target_data().get_data_layout());
        }
    }
    module
}

fn add_fn_attr<'ctx>(context: &'ctx Context, value: FunctionValue<'ctx>, name: &str) {
    let kind_id = inkwell::attributes::Attribute::get_named_enum_kind_id(name);
    let attr = context.create_enum_attribute(kind_id, 0);
    value.add_attribute(inkwell::attributes::AttributeLoc::Function, attr);
}

fn llvm_err(e: impl std::fmt::Debug) -> CodegenError {
    CodegenError::LlvmOperationFailed(format!("{e:?}"))
}

fn is_object_pointer(ty: &Type) -> bool {
    matches!(ty, Type::Object { .. }) || matches!(ty, Type::Pointer { pointee, .. } if matches!(**pointee, Type::Object { .. }))
}

fn operand_kind(expr: &Expr) -> Operand {
    match expr {
        Expr::Constant(..) => Operand::Literal,
        _ => Operand::Value,
    }
}

fn int_predicate(op: CmpOp, signed: bool) -> IntPredicate {
    match (op, signed) {
        (CmpOp::Eq, _) => IntPredicate::EQ,
        (CmpOp::Ne, _) => IntPredicate::NE,
        (CmpOp::Lt, true) => IntPredicate::SLT,
        (CmpOp::Lt, false) => IntPredicate::ULT,
        (CmpOp::Gt, true) => IntPredicate::SGT,
        (CmpOp::Gt, false) => IntPredicate::UGT,
        (CmpOp::Le, true) => IntPredicate::SLE,
        (CmpOp::Le, false) => IntPredicate::ULE,
        (CmpOp::Ge, true) => IntPredicate::SGE,
        (CmpOp::Ge, false) => IntPredicate::UGE,
    }
}

fn float_predicate(op: CmpOp) -> FloatPredicate {
    match op {
        CmpOp::Eq => FloatPredicate::OEQ,
        CmpOp::Ne => FloatPredicate::ONE,
        CmpOp::Lt => FloatPredicate::OLT,
        CmpOp::Gt => FloatPredicate::OGT,
        CmpOp::Le => FloatPredicate::OLE,
        CmpOp::Ge => FloatPredicate::OGE,
    }
}

fn coerce_to_bool<'ctx>(builder: &Builder<'ctx>, value: BasicValueEnum<'ctx>, ty: &Type) -> Result<inkwell::values::IntValue<'ctx>> {
    match ty {
        Type::Primitive { kind: PrimKind::Bool, .. } => Ok(value.into_int_value()),
        Type::Primitive { .. } => {
            let int_val = value.into_int_value();
            let zero = int_val.get_type().const_zero();
            Ok(builder.build_int_compare(IntPredicate::NE, int_val, zero, "tobool").map_err(llvm_err)?)
        }
        other => Err(CodegenError::TypeMismatch(format!("{other:?} cannot be used as a condition"))),
    }
}

fn coerce_to_bool_or_int<'ctx>(builder: &Builder<'ctx>, value: BasicValueEnum<'ctx>, ty: &Type) -> Result<inkwell::values::IntValue<'ctx>> {
    match ty {
        Type::Primitive { kind: PrimKind::Bool, .. } | Type::Primitive { kind: PrimKind::SignedInt, .. } | Type::Primitive { kind: PrimKind::UnsignedInt, .. } => {
            Ok(value.into_int_value())
        }
        _ => coerce_to_bool(builder, value, ty),
    }
}

fn zero_of(ty: inkwell::types::BasicTypeEnum<'_>) -> BasicValueEnum<'_> {
    use inkwell::types::BasicTypeEnum;
    match ty {
        BasicTypeEnum::IntType(t) => t.const_zero().into(),
        BasicTypeEnum::FloatType(t) => t.const_zero().into(),
        BasicTypeEnum::PointerType(t) => t.const_null().into(),
        BasicTypeEnum::ArrayType(t) => t.const_zero().into(),
        BasicTypeEnum::StructType(t) => t.const_zero().into(),
        BasicTypeEnum::VectorType(t) => t.const_zero().into(),
        BasicTypeEnum::ScalableVectorType(t) => t.const_zero().into(),
    }
}

fn build_const_array<'ctx>(elem_ty: inkwell::types::BasicTypeEnum<'ctx>, values: &[BasicValueEnum<'ctx>]) -> inkwell::values::ArrayValue<'ctx> {
    use inkwell::types::BasicTypeEnum;
    match elem_ty {
        BasicTypeEnum::IntType(t) => {
            let ints: Vec<_> = values.iter().map(|v| v.into_int_value()).collect();
            t.const_array(&ints)
        }
        BasicTypeEnum::FloatType(t) => {
            let floats: Vec<_> = values.iter().map(|v| v.into_float_value()).collect();
            t.const_array(&floats)
        }
        BasicTypeEnum::PointerType(t) => {
            let ptrs: Vec<_> = values.iter().map(|v| v.into_pointer_value()).collect();
            t.const_array(&ptrs)
        }
        _ => unreachable!("array element types are restricted to primitives and pointers"),
    }
}

/// If `body` is literally a bare name reference, returns that name so the
/// caller can skip auto-disposing the slot whose ownership the return
/// value is transferring to the caller.
fn returned_binding_name(body: &Expr) -> Option<String> {
    match body {
        Expr::Name(n) => Some(n.id.clone()),
        Expr::ExpressionBlock(exprs, _) => exprs.last().and_then(returned_binding_name),
        _ => None,
    }
}
