//! Command-line surface of the `netcom` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "netcom", version, about = "Autoatendimento Netcom")]
pub struct Cli {
    /// Imprime resultados e erros em JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Arquivo de configuração da API (padrão: netcom.toml no diretório de configuração)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Confere um valor de formulário
    #[command(subcommand)]
    Validate(ValidateCommand),

    /// Entra com CPF e senha
    Login {
        #[arg(long)]
        cpf: String,
        #[arg(long)]
        password: String,
    },

    /// Encerra a sessão atual
    Logout,

    /// Mostra o usuário conectado
    Whoami,

    /// Lista as linhas do cliente
    Lines,

    /// Plano e consumo de dados de uma linha
    Usage { line_id: String },

    /// Plano e histórico de pagamentos de uma linha
    Plan { line_id: String },

    /// Planos disponíveis
    Products,

    /// Cria uma conta passo a passo
    #[command(subcommand)]
    Register(RegisterCommand),

    /// Cartões salvos neste dispositivo
    #[command(subcommand)]
    Cards(CardsCommand),
}

#[derive(Debug, Subcommand)]
pub enum ValidateCommand {
    Cpf { value: String },
    BirthDate { value: String },
}

#[derive(Debug, Subcommand)]
pub enum RegisterCommand {
    Credentials {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    Personal {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cpf: String,
        /// DD/MM/AAAA
        #[arg(long)]
        birth_date: String,
        #[arg(long)]
        gender: Option<String>,
    },
    Address(AddressArgs),
    Line {
        #[arg(long)]
        iccid: String,
    },
    /// Altera um campo do cadastro
    Set { field: String, value: String },
    Show,
    /// Cria a conta com os dados do cadastro
    Submit {
        /// Obrigatória quando a etapa de credenciais foi feita em outra execução
        #[arg(long, requires = "confirm_password")]
        password: Option<String>,
        #[arg(long, requires = "password")]
        confirm_password: Option<String>,
    },
    Reset,
}

#[derive(Debug, Args)]
pub struct AddressArgs {
    #[arg(long)]
    pub cep: String,
    #[arg(long)]
    pub number: String,
    #[arg(long, default_value = "")]
    pub complement: String,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub neighbourhood: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CardsCommand {
    List,
    Add {
        #[arg(long)]
        number: String,
        #[arg(long)]
        name: String,
        /// MM/AA
        #[arg(long)]
        expiry: String,
        #[arg(long)]
        cvv: String,
        /// CPF do titular (padrão: usuário conectado)
        #[arg(long, default_value = "")]
        cpf: String,
    },
    Remove { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_nested_commands() {
        let cli = Cli::try_parse_from(["netcom", "--json", "usage", "ln-1"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Usage { ref line_id } if line_id == "ln-1"));

        let cli = Cli::try_parse_from([
            "netcom",
            "register",
            "personal",
            "--name",
            "Maria Silva",
            "--cpf",
            "11144477735",
            "--birth-date",
            "10/05/1990",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Register(RegisterCommand::Personal { gender: None, .. })
        ));

        let cli = Cli::try_parse_from([
            "netcom",
            "register",
            "submit",
            "--password",
            "segredo1",
            "--confirm-password",
            "segredo1",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Register(RegisterCommand::Submit {
                password: Some(_),
                confirm_password: Some(_)
            })
        ));
        assert!(
            Cli::try_parse_from(["netcom", "register", "submit", "--password", "segredo1"]).is_err()
        );

        let cli = Cli::try_parse_from(["netcom", "validate", "birth-date", "01/01/2000"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Validate(ValidateCommand::BirthDate { .. })
        ));
    }
}
