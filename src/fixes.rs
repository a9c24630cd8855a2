//! The built-in fix catalog.
//!
//! Each fix is an ordered rule list against one file of the booking app.
//! The literals mirror the app source exactly, indentation included, so a
//! rule only lands on the revision it was written for and skips otherwise.

use std::path::PathBuf;

use crate::patch::{Fix, Rule};

/// Every fix the binary knows about, oldest first.
pub fn all() -> Vec<Fix> {
    vec![
        login_phone(),
        login_connection(),
        designer_login_individual(),
        calendar_auto_open(),
    ]
}

/// Look a fix up by its catalog name.
pub fn find(name: &str) -> Option<Fix> {
    all().into_iter().find(|fix| fix.name == name)
}

/// The source files the catalog patches, deduplicated, catalog order.
pub fn targets() -> Vec<PathBuf> {
    let mut seen = Vec::new();
    for fix in all() {
        if !seen.contains(&fix.target) {
            seen.push(fix.target);
        }
    }
    seen
}

/// The first pass at individual designer logins. Swaps the dropdown
/// of registered designers for a phone number field and switches the
/// lookup from id to phone.
fn login_phone() -> Fix {
    Fix {
        name: "login-phone".to_string(),
        summary: "Replace the designer dropdown login with an individual phone login".to_string(),
        target: PathBuf::from("src/components/LoginPage.tsx"),
        rules: vec![
            Rule::new(
                "swap the selected-designer state for a phone state",
                r#"const [selectedDesigner, setSelectedDesigner] = useState<string>('');"#,
                r#"const [designerPhone, setDesignerPhone] = useState('');"#,
            ),
            Rule::new(
                "look up the designer by phone in handleDesignerLogin",
                r#"  const handleDesignerLogin = async (e: React.FormEvent) => {
    e.preventDefault();
    setLoading(true);
    setLoginError('');
    
    try {
      // Primeiro, obter o designer selecionado para pegar o email
      const designer = await getNailDesignerById(selectedDesigner);
      
      if (!designer) {
        setLoginError('Designer não encontrado!');"#,
                r#"  const handleDesignerLogin = async (e: React.FormEvent) => {
    e.preventDefault();
    setLoading(true);
    setLoginError('');
    
    try {
      // Buscar designer pelo telefone
      const designer = await getNailDesignerByPhone(designerPhone);
      
      if (!designer) {
        setLoginError('Telefone não encontrado!');"#,
            ),
            Rule::new(
                "replace the designer dropdown with a phone input",
                r#"              <div>
                <label className="block text-sm font-medium text-purple-100 mb-2">
                  Selecione seu perfil
                </label>
                <select
                  value={selectedDesigner}
                  onChange={(e) => {
                    setSelectedDesigner(e.target.value);
                    setLoginError('');
                  }}
                  className="w-full p-3 border border-white/30 rounded-xl focus:ring-2 focus:ring-pink-500 focus:border-transparent bg-purple-800/80 backdrop-blur-sm text-white placeholder-purple-200"
                  style={{
                    backgroundColor: 'rgba(107, 33, 168, 0.8)',
                    color: 'white'
                  }}
                  required
                >
                  <option value="" style={{ backgroundColor: '#6b21a8', color: 'white' }}>Escolha...</option>
                  {designers.map((designer) => (
                    <option key={designer.id} value={designer.id} style={{ backgroundColor: '#6b21a8', color: 'white' }}>
                      {designer.name}
                    </option>
                  ))}
                </select>
              </div>"#,
                r#"              <div>
                <label className="block text-sm font-medium text-purple-100 mb-2">
                  Telefone
                </label>
                <input
                  type="tel"
                  value={designerPhone}
                  onChange={(e) => {
                    setDesignerPhone(e.target.value);
                    setLoginError('');
                  }}
                  className="w-full p-3 border border-white/30 rounded-xl focus:ring-2 focus:ring-pink-500 focus:border-transparent bg-white/10 backdrop-blur-sm text-white placeholder-purple-200"
                  placeholder="Digite seu telefone"
                  required
                />
              </div>"#,
            ),
            Rule::new(
                "reset the phone field from the back button",
                r#"                  onClick={() => {
                    setShowDesignerLogin(false);
                    setSelectedDesigner('');
                    setPassword('');
                    setLoginError('');
                  }}"#,
                r#"                  onClick={() => {
                    setShowDesignerLogin(false);
                    setDesignerPhone('');
                    setPassword('');
                    setLoginError('');
                  }}"#,
            ),
            Rule::new(
                "gate the submit button on the phone field",
                r#"disabled={!selectedDesigner || !password || loading}"#,
                r#"disabled={!designerPhone || !password || loading}"#,
            ),
        ],
    }
}

/// Threads an isOnline prop through LoginPage and refuses to start a
/// client login while the app is offline.
fn login_connection() -> Fix {
    Fix {
        name: "login-connection".to_string(),
        summary: "Require an active connection before the client login runs".to_string(),
        target: PathBuf::from("src/components/LoginPage.tsx"),
        rules: vec![
            Rule::new(
                "add the isOnline prop to LoginPageProps",
                r#"interface LoginPageProps {
  onLogin: (designer: NailDesigner, asClient?: boolean) => void;
  onSuperAdminLogin?: () => void;
}"#,
                r#"interface LoginPageProps {
  onLogin: (designer: NailDesigner, asClient?: boolean) => void;
  onSuperAdminLogin?: () => void;
  isOnline?: boolean;
}"#,
            ),
            Rule::new(
                "default isOnline in the component signature",
                r#"export default function LoginPage({ onLogin, onSuperAdminLogin }: LoginPageProps) {"#,
                r#"export default function LoginPage({ onLogin, onSuperAdminLogin, isOnline = true }: LoginPageProps) {"#,
            ),
            Rule::new(
                "guard handleClientLogin behind the connection check",
                r#"  const handleClientLogin = async (e: React.FormEvent) => {
    e.preventDefault();
    setLoading(true);
    setClientLoginError('');
    
    try {
      // ✅ SEMPRE consultar Supabase primeiro (não localStorage)
      const client = await getClientByPhone(clientPhone);"#,
                r#"  const handleClientLogin = async (e: React.FormEvent) => {
    e.preventDefault();
    setLoading(true);
    setClientLoginError('');
    
    // Verificar conexão antes de tentar login
    if (!isOnline) {
      setClientLoginError('Sem conexão com a internet. Verifique sua conexão e tente novamente.');
      setLoading(false);
      return;
    }
    
    try {
      // ✅ SEMPRE consultar Supabase primeiro (não localStorage)
      const client = await getClientByPhone(clientPhone);"#,
            ),
        ],
    }
}

/// The follow-up to the phone login: keeps the original state line,
/// adds the phone state next to it, makes handleDesignerLogin check
/// the connection and look the designer up by phone, and turns the
/// dropdown into a WhatsApp number field.
fn designer_login_individual() -> Fix {
    Fix {
        name: "designer-login-individual".to_string(),
        summary: "Designer login by phone and password, no shared designer list".to_string(),
        target: PathBuf::from("src/components/LoginPage.tsx"),
        rules: vec![
            Rule::new(
                "add the designer phone state",
                r#"  const [selectedDesigner, setSelectedDesigner] = useState<string>('');
  const [password, setPassword] = useState('');"#,
                r#"  const [selectedDesigner, setSelectedDesigner] = useState<string>('');
  const [password, setPassword] = useState('');
  const [designerPhone, setDesignerPhone] = useState('');"#,
            ),
            Rule::new(
                "rework handleDesignerLogin around a phone lookup",
                r#"  const handleDesignerLogin = async (e: React.FormEvent) => {
    e.preventDefault();
    setLoading(true);
    setLoginError('');
    
    try {
      // Primeiro, obter o designer selecionado para pegar o email
      const designer = await getNailDesignerById(selectedDesigner);
      
      if (!designer) {
        setLoginError('Designer não encontrado!');
        return;
      }
      
      if (!designer.isActive) {
        setLoginError('Esta conta foi desativada.');
        return;
      }
      
      // Verificar senha diretamente com os dados da designer
      if (designer.password !== password) {
        setLoginError('Senha incorreta!');
        return;
      }
      
      // Login bem-sucedido - usar dados da designer diretamente
      onLogin(designer);
      
    } catch (error) {
      console.error('Erro no login:', error);
      setLoginError('Erro ao fazer login. Tente novamente.');
    } finally {
      setLoading(false);
    }
  };"#,
                r#"  const handleDesignerLogin = async (e: React.FormEvent) => {
    e.preventDefault();
    setLoading(true);
    setLoginError('');
    
    // Verificar conexão antes de tentar login
    if (!isOnline) {
      setLoginError('Sem conexão com a internet. Verifique sua conexão e tente novamente.');
      setLoading(false);
      return;
    }
    
    try {
      // Buscar designer pelo telefone
      const designer = await getNailDesignerByPhone(designerPhone);
      
      if (!designer) {
        setLoginError('Telefone não encontrado!');
        setLoading(false);
        return;
      }
      
      if (!designer.isActive) {
        setLoginError('Esta conta foi desativada.');
        setLoading(false);
        return;
      }
      
      // Verificar senha diretamente com os dados da designer
      if (designer.password !== password) {
        setLoginError('Senha incorreta!');
        setLoading(false);
        return;
      }
      
      // Login bem-sucedido - usar dados da designer diretamente
      onLogin(designer);
      
    } catch (error) {
      console.error('Erro no login:', error);
      setLoginError('Erro ao fazer login. Tente novamente.');
    } finally {
      setLoading(false);
    }
  };"#,
            ),
            Rule::new(
                "turn the designer dropdown into a WhatsApp number field",
                r#"            <form onSubmit={handleDesignerLogin} className="space-y-4">
              <div>
                <label className="block text-sm font-medium text-purple-100 mb-2">
                  Selecione seu perfil
                </label>
                <select
                  value={selectedDesigner}
                  onChange={(e) => {
                    setSelectedDesigner(e.target.value);
                    setLoginError('');
                  }}
                  className="w-full p-3 border border-white/30 rounded-xl focus:ring-2 focus:ring-pink-500 focus:border-transparent bg-purple-800/80 backdrop-blur-sm text-white placeholder-purple-200"
                  style={{
                    backgroundColor: 'rgba(107, 33, 168, 0.8)',
                    color: 'white'
                  }}
                  required
                >
                  <option value="" style={{ backgroundColor: '#6b21a8', color: 'white' }}>Escolha...</option>
                  {designers.map((designer) => (
                    <option key={designer.id} value={designer.id} style={{ backgroundColor: '#6b21a8', color: 'white' }}>
                      {designer.name}
                    </option>
                  ))}
                </select>
              </div>

              <div>
                <label className="block text-sm font-medium text-purple-100 mb-2">
                  Senha
                </label>"#,
                r#"            <form onSubmit={handleDesignerLogin} className="space-y-4">
              <div>
                <label className="block text-sm font-medium text-purple-100 mb-2">
                  Número do WhatsApp
                </label>
                <input
                  type="tel"
                  value={designerPhone}
                  onChange={(e) => {
                    setDesignerPhone(e.target.value);
                    setLoginError('');
                  }}
                  className="w-full p-3 border border-white/30 rounded-xl focus:ring-2 focus:ring-pink-500 focus:border-transparent bg-white/10 backdrop-blur-sm text-white placeholder-purple-200"
                  placeholder="(11) 99999-9999"
                  required
                />
              </div>

              <div>
                <label className="block text-sm font-medium text-purple-100 mb-2">
                  Senha
                </label>"#,
            ),
            Rule::new(
                "reset the phone field from the back button",
                r#"                  onClick={() => {
                    setShowDesignerLogin(false);
                    setSelectedDesigner('');
                    setPassword('');
                    setLoginError('');
                  }}"#,
                r#"                  onClick={() => {
                    setShowDesignerLogin(false);
                    setDesignerPhone('');
                    setPassword('');
                    setLoginError('');
                  }}"#,
            ),
            Rule::new(
                "gate the submit button on the phone field",
                r#"                  disabled={!selectedDesigner || !password || loading}"#,
                r#"                  disabled={!designerPhone || !password || loading}"#,
            ),
        ],
    }
}

/// Gives the date input a ref and adds a useEffect that calls
/// showPicker() shortly after the booking flow reaches step 3.
fn calendar_auto_open() -> Fix {
    Fix {
        name: "calendar-auto-open".to_string(),
        summary: "Open the date picker automatically on the date step".to_string(),
        target: PathBuf::from("src/components/BookingPage.tsx"),
        rules: vec![
            Rule::new(
                "add a ref for the date input",
                r#"  const [step, setStep] = useState(initialDesigner ? 2 : 1);"#,
                r#"  const [step, setStep] = useState(initialDesigner ? 2 : 1);
  const dateInputRef = useRef<HTMLInputElement>(null);"#,
            ),
            Rule::new(
                "attach the ref to the date input",
                r#"                  <div>
                    <input
                      type="date"
                      value={selectedDate}"#,
                r#"                  <div>
                    <input
                      ref={dateInputRef}
                      type="date"
                      value={selectedDate}"#,
            ),
            Rule::new(
                "auto-open the picker on the date step",
                r#"  }, [step, selectedDate]); // 🆕 Adicionar dependências"#,
                r#"  }, [step, selectedDate]); // 🆕 Adicionar dependências
  // Abrir calendário automaticamente quando chegar no step 3
  useEffect(() => {
    if (step === 3 && dateInputRef.current) {
      // Pequeno delay para garantir que o DOM está pronto
      setTimeout(() => {
        dateInputRef.current?.showPicker?.();
      }, 100);
    }
  }, [step]);
"#,
            )
            .with_alternate(
                r#"  }, [step, selectedDate]); // 🆕 Adicionar dependências

  // Listener para sincronização em tempo real"#,
                r#"  }, [step, selectedDate]); // 🆕 Adicionar dependências
  // Abrir calendário automaticamente quando chegar no step 3
  useEffect(() => {
    if (step === 3 && dateInputRef.current) {
      // Pequeno delay para garantir que o DOM está pronto
      setTimeout(() => {
        dateInputRef.current?.showPicker?.();
      }, 100);
    }
  }, [step]);


  // Listener para sincronização em tempo real"#,
            ),
        ],
    }
}
